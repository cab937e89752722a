/// UI module exports

pub mod app;
pub mod dashboard;
pub mod sidebar;
pub mod widgets;

pub use app::AppUI;
