pub mod access;
pub mod chat;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod metrics;
pub mod models;
pub mod poi;
pub mod scoring;
pub mod scrapers;
pub mod session;
pub mod store;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{DashboardError, StoreError};
