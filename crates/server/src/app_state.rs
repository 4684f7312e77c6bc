use server_api::ApiContext;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiContext,
}

impl AppState {
    pub fn new(api: ApiContext) -> Self {
        Self { api }
    }
}
