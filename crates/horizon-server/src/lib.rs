//! Horizon server: HTTP surface over the note and quiz pipelines.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
