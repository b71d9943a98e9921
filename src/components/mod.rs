pub mod app;
pub mod controls_panel;
pub mod game_over_overlay;
pub mod run_view;
pub mod tower_panel;
