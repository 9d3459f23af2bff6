//! Landing page.
//!
//! - GET /
//!   Renders the user/repo form. When both `user` and `repo` arrive as
//!   query parameters (the form submits back to `/`), redirects to the
//!   tree view at /{user}/{repo} instead.

use axum::{
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::render;

pub fn routes() -> Router {
    Router::new().route("/", get(landing))
}

#[derive(Debug, Default, Deserialize)]
struct LandingQuery {
    user: Option<String>,
    repo: Option<String>,
}

async fn landing(Query(query): Query<LandingQuery>) -> Response {
    match redirect_target(query.user.as_deref(), query.repo.as_deref()) {
        Some(target) => Redirect::to(&target).into_response(),
        None => Html(render::landing_page()).into_response(),
    }
}

/// `/{user}/{repo}` when both fields are present and non-empty.
fn redirect_target(user: Option<&str>, repo: Option<&str>) -> Option<String> {
    let user = user.filter(|u| !u.is_empty())?;
    let repo = repo.filter(|r| !r.is_empty())?;
    Some(format!("/{user}/{repo}"))
}
