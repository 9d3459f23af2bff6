//! Route handlers - maps HTTP endpoints to GitHub fetches and rendered HTML.
//!
//! Each submodule defines routes for a feature area:
//! - `index`: Landing form and user/repo redirect (GET /)
//! - `tree`: Tree view page and lazy subtree fragments

pub mod index;
pub mod tree;

use axum::Router;

use crate::github::SharedClient;

pub fn create_router(client: SharedClient) -> Router {
    Router::new()
        .merge(index::routes())
        .merge(tree::routes(client))
}
