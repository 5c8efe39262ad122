pub mod app;
pub mod chooser_view;
pub mod controls_panel;
