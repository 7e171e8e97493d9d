//! REST API implementation.

pub mod errors;
pub mod routes;
pub mod state;
pub mod types;

pub use state::AppState;
