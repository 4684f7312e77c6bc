//! Backend-to-UI events for the desktop GUI controller.

use client_core::Lifecycle;

#[derive(Debug, Clone)]
pub enum UiEvent {
    BackendReady { server_url: String },
    Info(String),
    Lifecycle(Lifecycle),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_context_and_message() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: address in use",
        );
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
        assert_eq!(
            err.message(),
            "backend worker startup failure: address in use"
        );
    }
}
