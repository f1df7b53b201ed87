//! Vitrina API Server module
//!
//! JSON HTTP API over the catalog controller.
//! Run with `vitrina-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server, ApiConfig, AppState};
