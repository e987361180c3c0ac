//! Session cookie → route gate → view or redirect to login.
//!
//! Attached per route (not per Router) so each layer knows which
//! `RouteDescriptor` it guards.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::MethodRouter,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::routes::{gate::Decision, table::RouteDescriptor};
use crate::state::AppState;

#[derive(Clone)]
struct Guarded {
    state: AppState,
    route: &'static RouteDescriptor,
}

/// Put the route gate in front of `handler`.
///
/// ```ignore
/// let home = middleware::auth::session::apply(get(views::home), state.clone(), route);
/// ```
pub fn apply(
    handler: MethodRouter<AppState>,
    state: AppState,
    route: &'static RouteDescriptor,
) -> MethodRouter<AppState> {
    // route_layer: only runs for methods the route actually serves (others stay 405)
    handler.route_layer(middleware::from_fn_with_state(
        Guarded { state, route },
        session_middleware,
    ))
}

async fn session_middleware(
    State(Guarded { state, route }): State<Guarded>,
    jar: CookieJar,
    req: Request<Body>,
    next: Next,
) -> Response {
    let credential = jar.get(&state.session_cookie).map(Cookie::value);

    match state.gate.evaluate(route, credential).await {
        Decision::Allow => next.run(req).await,
        Decision::Redirect(target) => Redirect::to(&state.href(target)).into_response(),
    }
}
