//! Path folding in front of the router: `/Home/` is served as `/home`.
//!
//! Runs around the whole Router (a `Router::layer` would only see the request
//! after routing), so the result is a service rather than a `Router`.

use axum::Router;
use axum::extract::Request;
use axum::http::Uri;
use axum::http::uri::PathAndQuery;
use tower::ServiceBuilder;
use tower::util::MapRequest;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

pub type App = NormalizePath<MapRequest<Router, fn(Request) -> Request>>;

/// Trim trailing slashes, then lowercase the path. The query string is left alone.
pub fn wrap(router: Router) -> App {
    ServiceBuilder::new()
        .layer(NormalizePathLayer::trim_trailing_slash())
        .map_request(fold_case as fn(Request) -> Request)
        .service(router)
}

fn fold_case(mut req: Request) -> Request {
    if req.uri().path().bytes().any(|b| b.is_ascii_uppercase()) {
        if let Some(uri) = lowercase_path(req.uri()) {
            *req.uri_mut() = uri;
        }
    }
    req
}

fn lowercase_path(uri: &Uri) -> Option<Uri> {
    let path = uri.path().to_ascii_lowercase();
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).ok()?);
    Uri::from_parts(parts).ok()
}
