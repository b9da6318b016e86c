//! The central domain logic and interface definitions for the blog backend.
//!
//! Everything the workflows depend on lives here: entity models, the port
//! traits implemented by the storage/auth adapters, and the shared error
//! taxonomy. This crate performs no I/O of its own.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
