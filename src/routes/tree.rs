//! Tree view page and lazy subtree fragments.
//!
//! - GET /{user}/{repo}?path=&ref=
//!   Full tree page for `path` (repository root when empty). For the root
//!   view every directory entry of the listing gets one concurrent child
//!   prefetch so the first expansion needs no round trip; deeper views
//!   never prefetch.
//!
//! - GET /{user}/{repo}/tree?path=&ref=
//!   One subtree rendered as an HTML <ul> fragment. Fetched by the client
//!   script when a directory without prefetched children is first opened.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Router,
};
use futures::future::join_all;
use serde::Deserialize;
use tracing::warn;

use crate::error::Result;
use crate::github::SharedClient;
use crate::models::ContentEntry;
use crate::render;

pub fn routes(client: SharedClient) -> Router {
    Router::new()
        .route("/{user}/{repo}", get(tree_page))
        .route("/{user}/{repo}/tree", get(tree_fragment))
        .with_state(client)
}

#[derive(Debug, Deserialize)]
struct TreeQuery {
    #[serde(default)]
    path: String,
    #[serde(rename = "ref")]
    reference: Option<String>,
}

/// Everything that identifies one tree request. Recomputed per request,
/// never persisted.
#[derive(Debug, Clone)]
pub struct RouteContext {
    pub user: String,
    pub repo: String,
    pub path: String,
    pub reference: Option<String>,
}

impl RouteContext {
    fn new(user: String, repo: String, query: TreeQuery) -> Self {
        Self {
            user,
            repo,
            path: query.path,
            reference: query.reference,
        }
    }
}

async fn tree_page(
    State(client): State<SharedClient>,
    Path((user, repo)): Path<(String, String)>,
    Query(query): Query<TreeQuery>,
) -> Result<Html<String>> {
    let ctx = RouteContext::new(user, repo, query);
    let (root, prefetched) = load_tree(&client, &ctx).await?;
    Ok(Html(render::tree_page(&ctx, &root, &prefetched)))
}

async fn tree_fragment(
    State(client): State<SharedClient>,
    Path((user, repo)): Path<(String, String)>,
    Query(query): Query<TreeQuery>,
) -> Result<Html<String>> {
    let ctx = RouteContext::new(user, repo, query);
    let entries = client
        .contents(&ctx.user, &ctx.repo, &ctx.path, ctx.reference.as_deref())
        .await?;
    Ok(Html(render::tree_list(
        &entries,
        &ctx.path,
        &ctx,
        &HashMap::new(),
    )))
}

/// Fetch the entries for the requested path. The root view also prefetches
/// one level of children; anything deeper leaves expansion to the fragment
/// route.
async fn load_tree(
    client: &SharedClient,
    ctx: &RouteContext,
) -> Result<(Vec<ContentEntry>, HashMap<String, Vec<ContentEntry>>)> {
    let root = client
        .contents(&ctx.user, &ctx.repo, &ctx.path, ctx.reference.as_deref())
        .await?;

    let prefetched = if ctx.path.is_empty() {
        prefetch_children(client, ctx, &root).await
    } else {
        HashMap::new()
    };

    Ok((root, prefetched))
}

/// One concurrent contents request per directory entry, keyed by the
/// requesting entry's path. Each fetch resolves on its own; a failed
/// subtree is dropped from the map (its node falls back to the lazy path)
/// and never blocks the root listing or siblings.
async fn prefetch_children(
    client: &SharedClient,
    ctx: &RouteContext,
    root: &[ContentEntry],
) -> HashMap<String, Vec<ContentEntry>> {
    let fetches = root
        .iter()
        .filter(|entry| entry.entry_type.is_dir())
        .map(|entry| {
            let path = entry.path.clone();
            async move {
                let result = client
                    .contents(&ctx.user, &ctx.repo, &path, ctx.reference.as_deref())
                    .await;
                (path, result)
            }
        });

    let mut children = HashMap::new();
    for (path, result) in join_all(fetches).await {
        match result {
            Ok(entries) => {
                children.insert(path, entries);
            }
            Err(e) => warn!("prefetch of {path} failed: {e}"),
        }
    }
    children
}
