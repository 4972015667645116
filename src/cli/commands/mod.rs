mod analyze;
mod classify;
mod config;
mod model;
mod status;

pub use analyze::AnalyzeArgs;
pub use classify::ClassifyArgs;
pub use config::ConfigCommand;
pub use status::StatusArgs;

pub use analyze::handle_analyze;
pub use classify::handle_classify;
pub use config::handle_config;
pub use status::handle_status;
