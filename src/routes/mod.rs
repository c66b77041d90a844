use crate::blog::PostID;
use crate::error::AppError;
use crate::state::{NestedRouter, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// The whole site. Trailing slashes are trimmed before routing.
pub type App = NormalizePath<axum::Router>;

mod about;
mod contact;
mod form;
mod home;
mod post;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/", get(home::get))
        .route("/about", get(about::get))
        .route("/contact", get(contact::get).post(contact::post))
        .merge(post::route())
        .fallback(|| async { AppError::NotFound })
}

pub fn app(state: Arc<State>) -> App {
    let compression_layer = tower_http::compression::CompressionLayer::new()
        .br(true)
        .quality(tower_http::CompressionLevel::Default);

    let router = route()
        .with_state(state)
        .layer(compression_layer)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// `302 Found`, the redirect browsers follow with a GET after a form POST.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}

/// Post ids in paths that are not integers are treated as missing posts.
pub(crate) fn parse_id(raw: &str) -> Result<PostID, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}
