mod backend_bridge;
mod config;
mod controller;
mod ui;

use crossbeam_channel::bounded;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::DesktopGuiApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = config::load_settings();
    tracing::info!(
        server_url = %settings.server_url,
        profile = settings.profile.name(),
        "starting desktop gui"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.server_url.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Avaliador de Atividade Especial")
            .with_inner_size([1080.0, 760.0])
            .with_min_inner_size([860.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Avaliador de Atividade Especial",
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, settings)))),
    )
}
