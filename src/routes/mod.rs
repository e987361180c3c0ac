/*
 * Responsibility
 * - Route table (name / path / view / requires_auth)
 * - Gate deciding allow vs redirect per navigation
 * - routes(): Router with one gated GET per table entry
 */
pub mod gate;
pub mod table;

use axum::Router;

use crate::middleware::auth::session;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    table::all().iter().fold(Router::new(), |router, route| {
        router.route(
            route.path,
            session::apply(route.view.handler(), state.clone(), route),
        )
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use tower::ServiceExt;

    use super::gate::{Gate, testing::FakeSessions};
    use super::*;
    use crate::middleware::path::App;

    fn app(base_path: &str) -> App {
        let gate = Gate::new(Arc::new(FakeSessions::accepting("good-token")));
        let state = AppState::new(gate, base_path, "session");
        crate::app::build_app(state)
    }

    async fn get(app: App, path: &str, cookie: Option<&str>) -> axum::response::Response {
        let mut req = Request::builder().method(Method::GET).uri(path);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
    }

    fn location(resp: &axum::response::Response) -> Option<&str> {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn home_signed_out_redirects_to_login() {
        let resp = get(app("/"), "/home", None).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/login"));
    }

    #[tokio::test]
    async fn home_with_unknown_token_redirects_to_login() {
        let resp = get(app("/"), "/home", Some("session=expired")).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/login"));
    }

    #[tokio::test]
    async fn home_signed_in_renders_home() {
        let resp = get(app("/"), "/home", Some("theme=dark; session=good-token")).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains(r#"<main id="home">"#));
    }

    #[tokio::test]
    async fn login_signed_out_is_allowed() {
        let resp = get(app("/"), "/login", None).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains(r#"<main id="login">"#));
    }

    #[tokio::test]
    async fn signup_signed_in_is_not_redirected() {
        let resp = get(app("/"), "/sinup", Some("session=good-token")).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains(r#"<main id="sinup">"#));
    }

    #[tokio::test]
    async fn base_path_prefixes_routes_and_redirects() {
        let resp = get(app("/blog"), "/blog/home", None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/blog/login"));

        let resp = get(app("/blog"), "/blog/login", None).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = get(app("/blog"), "/login", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn undeclared_paths_are_not_served() {
        for path in ["/", "/signup", "/home/extra"] {
            let resp = get(app("/"), path, None).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
        }
    }

    #[tokio::test]
    async fn responses_carry_request_id_and_security_headers() {
        let resp = get(app("/"), "/login", None).await;

        assert!(resp.headers().contains_key("x-request-id"));
        assert_eq!(
            resp.headers().get("x-frame-options").unwrap(),
            "DENY"
        );
    }

    #[tokio::test]
    async fn redirect_does_not_leak_gated_view() {
        let resp = get(app("/"), "/home", None).await;
        assert!(!body_text(resp).await.contains("<main"));
    }

    #[tokio::test]
    async fn trailing_slash_and_case_reach_the_gate() {
        let resp = get(app("/"), "/home/", None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/login"));

        let resp = get(app("/"), "/Home", None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/login"));

        let resp = get(app("/"), "/HOME/", Some("session=good-token")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains(r#"<main id="home">"#));
    }

    #[tokio::test]
    async fn public_routes_tolerate_case_and_trailing_slash() {
        for path in ["/Login", "/login/", "/SINUP/"] {
            let resp = get(app("/"), path, None).await;
            assert_eq!(resp.status(), StatusCode::OK, "{path}");
        }

        let resp = get(app("/blog"), "/Blog/Login/", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
