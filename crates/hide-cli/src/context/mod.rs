mod app_context;
mod config_warnings;

pub use app_context::{AppContext, editor_settings};
pub use config_warnings::warn_unconfigured;
