pub mod config;
pub mod load_config;

pub use config::{Bundle, BundleConfig, Config, DEFAULT_TYPE_ENV, SERVICE_NAME_ENV};
pub use load_config::{load, save};
