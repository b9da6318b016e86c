//! State shared across all request handlers.

use std::sync::Arc;

use domains::TokenService;
use services::{PostService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub posts: Arc<PostService>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    pub fn new(
        users: Arc<UserService>,
        posts: Arc<PostService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            posts,
            tokens,
        }
    }
}
