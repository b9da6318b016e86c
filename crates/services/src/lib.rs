//! Workflow services for the blog backend.
//!
//! Each service method is one user-facing operation: validate input,
//! touch the blob store and the record stores in a fixed order, and map
//! every failure into the domain [`AppError`](domains::AppError)
//! taxonomy. There is no cross-request coordination here; concurrent
//! requests race with last-write-wins semantics at the store layer.

pub mod post;
pub mod upload;
pub mod user;

pub use post::{PostDraft, PostService};
pub use upload::{MAX_AVATAR_BYTES, MAX_THUMBNAIL_BYTES};
pub use user::{EditProfile, Registration, Session, UserService};
