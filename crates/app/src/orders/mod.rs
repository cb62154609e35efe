//! Orders

mod models;
mod service;
mod workflow;

pub use models::*;
pub use service::*;
pub use workflow::*;
