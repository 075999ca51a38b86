//! Marketplace library
//!
//! Core modules for the service marketplace API: catalog browsing, task
//! routing and service administration over PostgreSQL.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
