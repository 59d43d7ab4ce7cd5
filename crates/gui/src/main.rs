mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::scene`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use woodshop_gui_lib::cutlist;
pub use woodshop_gui_lib::gizmo;
pub use woodshop_gui_lib::scene;
pub use woodshop_gui_lib::state;
pub use woodshop_gui_lib::units;

use app::WorkshopApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "woodshop_gui=info".into()),
        )
        .init();

    // Parse --project <path> argument
    let initial_snapshot = parse_project_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Woodshop — Lumber Layout")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "woodshop-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(WorkshopApp::new(cc, initial_snapshot)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_project_arg() -> Option<shared::Snapshot> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--project" && i + 1 < args.len() {
            let path = &args[i + 1];
            match std::fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<shared::Snapshot>(&json) {
                    Ok(snapshot) => {
                        tracing::info!(
                            "Loaded project from {path} ({} pieces)",
                            snapshot.entities.len()
                        );
                        return Some(snapshot);
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse project JSON from {path}: {e}");
                    }
                },
                Err(e) => {
                    tracing::error!("Failed to read project file {path}: {e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}
