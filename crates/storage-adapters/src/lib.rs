//! Storage adapters implementing the persistence and blob ports.
//!
//! `postgres` (behind the `db-postgres` feature) is the production
//! backend; `memory` and `media_memory` are always-compiled in-process
//! implementations used by the test crates; `media_local` is the
//! filesystem blob store the server runs with.

pub mod media_local;
pub mod media_memory;
pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use media_local::LocalBlobStore;
pub use media_memory::MemoryBlobStore;
pub use memory::{MemoryPostRepo, MemoryUserRepo};

#[cfg(feature = "db-postgres")]
pub use postgres::{PgPostRepo, PgUserRepo};
