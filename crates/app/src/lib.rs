//! Haat application layer: session storage, configuration, and the typed
//! HTTP client over the marketplace API.

pub mod auth;
pub mod config;
pub mod context;
pub mod errors;
pub mod http;
pub mod orders;
pub mod products;
pub mod session;
pub mod users;
