pub mod config;
pub mod formatter;
pub mod models;
pub mod notifier;
pub mod publisher;
pub mod stackexchange_api;
pub mod watermark;

pub use config::NotifierConfig;
pub use notifier::{Notifier, RunSummary};
