//! Status banner, result blocks, and minuta panels.

use eframe::egui;

use crate::ui::app::{PanelSurface, StatusBannerSeverity};

pub fn status_banner(ui: &mut egui::Ui, surface: &mut PanelSurface) {
    let Some(banner) = surface.banner.clone() else {
        return;
    };

    let (fill, stroke) = match banner.severity {
        StatusBannerSeverity::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
        ),
        StatusBannerSeverity::Info => (
            egui::Color32::from_rgb(45, 77, 51),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(96, 145, 103)),
        ),
    };

    egui::Frame::NONE
        .fill(fill)
        .stroke(stroke)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dispensar").clicked() {
                        surface.banner = None;
                    }
                });
            });
        });
    ui.add_space(8.0);
}

/// Result blocks, hidden until the first successful evaluation.
pub fn results_panel(ui: &mut egui::Ui, surface: &PanelSurface) {
    if !surface.revealed {
        return;
    }

    ui.add_space(10.0);
    ui.heading("Resultados da Avaliação");
    ui.add_space(4.0);

    for block in &surface.blocks {
        let verdict_color = if block.eh_especial {
            egui::Color32::from_rgb(0x3c, 0x76, 0x3d)
        } else {
            egui::Color32::from_rgb(0xa9, 0x44, 0x42)
        };

        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(1.0, verdict_color))
            .show(ui, |ui| {
                labeled_line(ui, "Período:", &block.periodo);
                labeled_line(ui, "Agente:", &block.agente);
                if let Some(limite) = &block.limite {
                    labeled_line(ui, "Limite no período:", limite);
                }
                labeled_line(ui, "Intensidade informada:", &block.intensidade);
                if let Some(fundamento) = &block.fundamento {
                    labeled_line(ui, "Fundamento:", fundamento);
                }
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new("Resultado:").strong());
                    ui.label(
                        egui::RichText::new(block.resultado)
                            .color(verdict_color)
                            .strong(),
                    );
                });
                for detail in &block.detalhes {
                    labeled_line(ui, &format!("{}:", detail.label), &detail.value);
                }
            });
        ui.add_space(6.0);
    }
}

/// Minuta panel with its copy button. Returns whether copy was clicked.
pub fn minuta_panel(ui: &mut egui::Ui, surface: &PanelSurface) -> bool {
    if !surface.revealed {
        return false;
    }

    ui.add_space(10.0);
    ui.heading("Minuta");
    ui.add_space(4.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(&surface.minuta);
    });
    ui.button("Copiar Minuta").clicked()
}

fn labeled_line(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(label).strong());
        ui.label(value);
    });
}
