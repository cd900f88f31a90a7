//! HTTP API for build generation

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::AppState;
pub use models::ApiError;
pub use routes::build_router;
