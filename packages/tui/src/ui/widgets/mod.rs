pub mod help;
pub mod status_bar;

pub use help::HelpWidget;
pub use status_bar::StatusBarWidget;
