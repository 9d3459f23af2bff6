//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for all error conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to HTTP responses with a
//! minimal HTML error page.
//!
//! Error mappings:
//! - `UpstreamStatus` with 404 → 404, any other status → 502
//! - `Upstream`, `Decode` → 502

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::render;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("GitHub responded with {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("could not decode GitHub response: {0}")]
    Decode(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Upstream(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::UpstreamStatus { status, .. } if *status == 404 => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::UpstreamStatus { .. } => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::Decode(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
        };

        let body = Html(render::error_page(status.as_u16(), &message));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
