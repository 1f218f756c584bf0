pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod seed;
pub mod services;

pub use app::{App, FetchOutcome};
pub use config::Config;
pub use error::{AppError, Result};
