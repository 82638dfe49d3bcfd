//! ShareIt - peer-to-peer item sharing server
//!
//! A REST JSON API where users list items, other users book them for a time
//! range, owners approve or reject bookings, and past borrowers leave
//! comments once their rental has ended.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
