use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{domain::EmployeeId, validation::Field};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    directory::DirectoryController,
    events::{UiError, UiErrorContext, UiEvent},
    modal::Modal,
    notifications::ToastKind,
    orchestration::dispatch_backend_command,
};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Directory server to talk to; `None` starts a seeded embedded one.
    pub server_url: Option<String>,
    /// Response delay applied by the embedded server.
    pub latency: Duration,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            latency: Duration::from_millis(400),
        }
    }
}

enum RowAction {
    View(EmployeeId),
    Edit(EmployeeId),
    Delete(EmployeeId),
}

fn toast_fill(kind: ToastKind) -> (egui::Color32, egui::Stroke) {
    match kind {
        ToastKind::Success => (
            egui::Color32::from_rgb(46, 96, 64),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(92, 160, 112)),
        ),
        ToastKind::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
        ),
    }
}

fn form_field(
    ui: &mut egui::Ui,
    id: &'static str,
    field: Field,
    value: &mut String,
    error: Option<&str>,
    read_only: bool,
) {
    ui.label(egui::RichText::new(field.label()).strong());
    let edit = egui::TextEdit::singleline(value)
        .id_salt(id)
        .desired_width(f32::INFINITY);
    ui.add_enabled(!read_only, edit);
    if let Some(error) = error {
        let color = ui.visuals().error_fg_color;
        ui.colored_label(color, error);
    }
    ui.add_space(4.0);
}

pub struct DirectoryApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: DirectoryController,
    search: String,
}

impl DirectoryApp {
    /// Builds the app and queues the initial fetch.
    pub fn bootstrap(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller: DirectoryController::new(),
            search: String::new(),
        };
        app.queue(BackendCommand::FetchAll);
        app
    }

    fn queue(&mut self, cmd: BackendCommand) {
        let mut status = String::new();
        if !dispatch_backend_command(&self.cmd_tx, cmd, &mut status) {
            self.controller.handle_event(UiEvent::Error(UiError::from_message(
                UiErrorContext::General,
                status,
            )));
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.handle_event(event);
        }
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Employee Directory");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Add Employee").clicked() {
                        self.controller.open_create();
                    }
                    let search = egui::TextEdit::singleline(&mut self.search)
                        .id_salt("employee_search")
                        .hint_text("Search by name, email or role")
                        .desired_width(260.0);
                    if ui.add(search).changed() {
                        self.controller.set_filter(&self.search);
                    }
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.controller.status).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let view = &mut self.controller.view;
                    let last_page = view.page() + 1 >= view.page_count();
                    if ui.add_enabled(!last_page, egui::Button::new("Next")).clicked() {
                        view.next_page();
                    }
                    ui.label(format!("Page {} of {}", view.page() + 1, view.page_count()));
                    if ui
                        .add_enabled(view.page() > 0, egui::Button::new("Previous"))
                        .clicked()
                    {
                        view.previous_page();
                    }
                });
            });
        });
    }

    fn show_table(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.controller.state().loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading employees...");
                });
                ui.add_space(4.0);
            }

            let mut action = None;
            let mut sort_clicked = false;
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("employee_table")
                    .striped(true)
                    .num_columns(4)
                    .spacing([24.0, 8.0])
                    .show(ui, |ui| {
                        if ui.button(self.controller.view.sort().label()).clicked() {
                            sort_clicked = true;
                        }
                        ui.strong("Email");
                        ui.strong("Role");
                        ui.strong("Actions");
                        ui.end_row();

                        for employee in self.controller.view.page_rows() {
                            ui.label(&employee.name);
                            ui.label(&employee.email);
                            ui.label(&employee.role);
                            ui.horizontal(|ui| {
                                if ui.small_button("View").clicked() {
                                    action = Some(RowAction::View(employee.id.clone()));
                                }
                                if ui.small_button("Edit").clicked() {
                                    action = Some(RowAction::Edit(employee.id.clone()));
                                }
                                if ui.small_button("Delete").clicked() {
                                    action = Some(RowAction::Delete(employee.id.clone()));
                                }
                            });
                            ui.end_row();
                        }
                    });

                if self.controller.view.rows().is_empty() && !self.controller.state().loading {
                    ui.add_space(12.0);
                    ui.label(egui::RichText::new("No employees found.").weak());
                }
            });

            if sort_clicked {
                self.controller.cycle_sort();
            }
            match action {
                Some(RowAction::View(id)) => self.controller.open_view(&id),
                Some(RowAction::Edit(id)) => self.controller.open_edit(&id),
                Some(RowAction::Delete(id)) => self.controller.request_delete(&id),
                None => {}
            }
        });
    }

    fn show_modal(&mut self, ctx: &egui::Context) {
        let mut submit = false;
        let mut confirm = false;
        let mut cancel = false;

        match &mut self.controller.modal {
            Modal::None => return,
            Modal::Form(form) => {
                let mut open = true;
                egui::Window::new(form.mode.title())
                    .collapsible(false)
                    .resizable(false)
                    .open(&mut open)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.set_min_width(320.0);
                        let read_only = form.mode.read_only();
                        let errors = form.errors.clone();
                        form_field(
                            ui,
                            "employee_form_name",
                            Field::Name,
                            &mut form.draft.name,
                            errors.for_field(Field::Name),
                            read_only,
                        );
                        form_field(
                            ui,
                            "employee_form_email",
                            Field::Email,
                            &mut form.draft.email,
                            errors.for_field(Field::Email),
                            read_only,
                        );
                        form_field(
                            ui,
                            "employee_form_role",
                            Field::Role,
                            &mut form.draft.role,
                            errors.for_field(Field::Role),
                            read_only,
                        );

                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            if !read_only {
                                let label = if form.submitting { "Saving..." } else { "Save" };
                                if ui
                                    .add_enabled(!form.submitting, egui::Button::new(label))
                                    .clicked()
                                {
                                    submit = true;
                                }
                            }
                            let dismiss = if read_only { "Close" } else { "Cancel" };
                            if ui.button(dismiss).clicked() {
                                cancel = true;
                            }
                        });
                    });
                if !open {
                    cancel = true;
                }
            }
            Modal::ConfirmDelete { name, .. } => {
                egui::Window::new("Delete Employee")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.label(format!("Are you sure you want to delete {name}?"));
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            if ui.button("Delete").clicked() {
                                confirm = true;
                            }
                            if ui.button("Cancel").clicked() {
                                cancel = true;
                            }
                        });
                    });
            }
        }

        if submit {
            if let Some(cmd) = self.controller.submit_form() {
                self.queue(cmd);
            }
        }
        if confirm {
            if let Some(cmd) = self.controller.confirm_delete() {
                self.queue(cmd);
            }
        }
        if cancel {
            self.controller.cancel_modal();
        }
    }

    fn show_toasts(&mut self, ctx: &egui::Context) {
        if self.controller.toasts.is_empty() {
            return;
        }
        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -40.0])
            .show(ctx, |ui| {
                for (index, toast) in self.controller.toasts.visible().iter().enumerate() {
                    let (fill, stroke) = toast_fill(toast.kind);
                    egui::Frame::NONE
                        .fill(fill)
                        .stroke(stroke)
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(&toast.message)
                                        .color(egui::Color32::WHITE),
                                );
                                if ui.small_button("x").clicked() {
                                    dismissed = Some(index);
                                }
                            });
                        });
                    ui.add_space(6.0);
                }
            });
        if let Some(index) = dismissed {
            self.controller.toasts.dismiss(index);
        }
    }
}

impl eframe::App for DirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.controller.toasts.expire(Instant::now());

        self.show_toolbar(ctx);
        self.show_status_bar(ctx);
        self.show_table(ctx);
        self.show_modal(ctx);
        self.show_toasts(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
