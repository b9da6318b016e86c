//! The web routing and orchestration layer for the blog backend.
//!
//! Thin axum handlers over the workflow services: extract and shape the
//! request, call exactly one service method, and serialize the result.
//! All failures leave through the uniform `{message, code}` error body.

pub mod auth;
pub mod error;
pub mod form;
pub mod posts;
pub mod routes;
pub mod state;
pub mod users;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
