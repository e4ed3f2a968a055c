pub mod app_config;
pub mod model;

pub use app_config::{AppConfig, Credentials, load_config};
pub use model::MonitorConfig;
