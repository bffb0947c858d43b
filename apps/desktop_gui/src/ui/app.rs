//! App shell: the period form, the submission flow, and the display state
//! the controller writes into.

use arboard::Clipboard;
use client_core::render::ResultBlock;
use client_core::{ClipboardText, EvaluationSurface, FormController};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{FormProfile, HazardAgent, PeriodId, VibrationUnit};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{classify_backend_failure, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::panels;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBannerSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusBanner {
    pub severity: StatusBannerSeverity,
    pub message: String,
}

impl StatusBanner {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: StatusBannerSeverity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: StatusBannerSeverity::Error,
            message: message.into(),
        }
    }
}

/// Display state the controller writes into: the result and minuta panels
/// plus the status banner standing in for the page's alerts.
#[derive(Default)]
pub struct PanelSurface {
    pub revealed: bool,
    pub blocks: Vec<ResultBlock>,
    pub minuta: String,
    pub banner: Option<StatusBanner>,
}

impl EvaluationSurface for PanelSurface {
    fn show_evaluation(&mut self, blocks: Vec<ResultBlock>, minuta: &str) {
        self.revealed = true;
        self.blocks = blocks;
        self.minuta = minuta.to_string();
        self.banner = None;
    }

    fn show_failure(&mut self, notice: &str) {
        self.banner = Some(StatusBanner::error(notice));
    }

    fn notify(&mut self, notice: &str) {
        self.banner = Some(StatusBanner::info(notice));
    }
}

struct SystemClipboard;

impl ClipboardText for SystemClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    settings: Settings,
    controller: FormController<PanelSurface>,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: Settings,
    ) -> Self {
        let controller = FormController::new(settings.profile, PanelSurface::default());
        Self {
            cmd_tx,
            ui_rx,
            settings,
            controller,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(text) => {
                    tracing::info!(message = %text, "backend worker notice");
                    self.controller.surface_mut().banner = Some(StatusBanner::info(text));
                }
                UiEvent::Error(err) => {
                    tracing::error!(
                        context = ?err.context(),
                        message = err.message(),
                        "backend worker error"
                    );
                    let text = classify_backend_failure(err.message());
                    self.controller.surface_mut().banner = Some(StatusBanner::error(text));
                }
                UiEvent::EvaluationFinished(outcome) => self.controller.finish_submit(outcome),
            }
        }
    }

    fn request_evaluation(&mut self) {
        let Some(periodos) = self.controller.begin_submit() else {
            return;
        };
        let mut status = String::new();
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Evaluate { periodos },
            &mut status,
        );
        if !status.is_empty() {
            self.controller.cancel_submit();
            self.controller.surface_mut().banner = Some(StatusBanner::error(status));
        }
    }

    fn copy_minuta_to_clipboard(&mut self) {
        let mut clipboard = SystemClipboard;
        self.controller.copy_minuta(&mut clipboard);
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let profile = self.settings.profile;
        let pending = self.controller.pending();

        ui.heading("Períodos");
        ui.add_space(4.0);

        // Row edits happen in place; structural changes are deferred until
        // the iteration is over.
        let mut remove_request: Option<PeriodId> = None;
        let mut agent_change: Option<(PeriodId, HazardAgent)> = None;

        for row in self.controller.form_mut().rows_mut() {
            let id = row.id();
            egui::Frame::group(ui.style()).show(ui, |ui| {
                egui::Grid::new(("period_row", id.0))
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Data Início:");
                        let inicio = ui.add(
                            egui::TextEdit::singleline(&mut row.data_inicio)
                                .hint_text("AAAA-MM-DD")
                                .desired_width(140.0),
                        );
                        if inicio.changed() {
                            row.refresh_formatted_dates();
                        }
                        if inicio.lost_focus() {
                            let value = row.data_inicio.clone();
                            row.set_data_inicio(&value);
                        }
                        ui.end_row();

                        ui.label("Data Fim:");
                        let fim = ui.add(
                            egui::TextEdit::singleline(&mut row.data_fim)
                                .hint_text("AAAA-MM-DD")
                                .desired_width(140.0),
                        );
                        if fim.changed() {
                            row.refresh_formatted_dates();
                        }
                        if fim.lost_focus() {
                            let value = row.data_fim.clone();
                            row.set_data_fim(&value);
                        }
                        ui.end_row();

                        ui.label("Agente Nocivo:");
                        let selected_text =
                            row.agente.map(HazardAgent::label).unwrap_or("Selecione...");
                        egui::ComboBox::from_id_salt(("agente", id.0))
                            .selected_text(selected_text)
                            .show_ui(ui, |ui| {
                                for agent in profile.agents() {
                                    if ui
                                        .selectable_label(row.agente == Some(*agent), agent.label())
                                        .clicked()
                                    {
                                        agent_change = Some((id, *agent));
                                    }
                                }
                            });
                        ui.end_row();

                        ui.label("Intensidade:");
                        ui.horizontal(|ui| {
                            let step = profile.intensity_step(row.agente);
                            ui.add(
                                egui::TextEdit::singleline(&mut row.intensidade)
                                    .hint_text(format!("passo {step}"))
                                    .desired_width(100.0),
                            );
                            if profile.unit_selector_visible(row.agente) {
                                let selected = row.unidade_medida.unwrap_or(VibrationUnit::Ms2);
                                egui::ComboBox::from_id_salt(("unidade", id.0))
                                    .selected_text(selected.label())
                                    .show_ui(ui, |ui| {
                                        for unit in VibrationUnit::ALL {
                                            if ui
                                                .selectable_label(
                                                    row.unidade_medida == Some(unit),
                                                    unit.label(),
                                                )
                                                .clicked()
                                            {
                                                row.unidade_medida = Some(unit);
                                            }
                                        }
                                    });
                            }
                        });
                        ui.end_row();
                    });

                if ui.button("Remover").clicked() {
                    remove_request = Some(id);
                }
            });
            ui.add_space(6.0);
        }

        if let Some((id, agente)) = agent_change {
            self.controller.form_mut().set_agent(id, Some(agente));
        }
        if let Some(id) = remove_request {
            self.controller.form_mut().remove_period(id);
        }

        if ui.button("Adicionar Período").clicked() {
            self.controller.form_mut().add_period();
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let submit = ui.add_enabled(!pending, egui::Button::new("Avaliar Períodos"));
            if submit.clicked() {
                self.request_evaluation();
            }
            if pending {
                ui.spinner();
                ui.label("Avaliando...");
            }
        });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let variant_label = match self.settings.profile {
            FormProfile::Full => "completa",
            FormProfile::Reduced => "reduzida",
        };

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Avaliador de Atividade Especial");
            ui.weak(format!(
                "Serviço: {} (variante {variant_label})",
                self.settings.server_url
            ));
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                panels::status_banner(ui, self.controller.surface_mut());
                self.show_form(ui);
                panels::results_panel(ui, self.controller.surface());
                if panels::minuta_panel(ui, self.controller.surface()) {
                    self.copy_minuta_to_clipboard();
                }
            });
        });

        // Worker events arrive while the window is idle; keep polling.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
