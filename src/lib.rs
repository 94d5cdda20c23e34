rust_i18n::i18n!("locales", fallback = "en");

pub mod cache;
pub mod config;
mod db;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod session;

pub use db::*;
pub use routes::{AppState, router};
