pub mod cutlist_panel;
pub mod inspector;
pub mod outliner;
pub mod status_bar;
pub mod toolbar;
