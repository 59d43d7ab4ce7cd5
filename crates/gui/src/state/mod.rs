pub mod builder;

pub use builder::{display_name, short_id, BuilderStore, Command, HISTORY_DEPTH};

/// Panel visibility flags
pub struct PanelVisibility {
    pub outliner: bool,
    pub inspector: bool,
    pub cut_list: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            outliner: true,
            inspector: true,
            cut_list: false,
        }
    }
}

/// Combined application state
#[derive(Default)]
pub struct AppState {
    pub store: BuilderStore,
    pub panels: PanelVisibility,
}
