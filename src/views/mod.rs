/*
 * Responsibility
 * - Page components rendered for each route (placeholder markup only)
 * - Forms / styling live outside this crate
 */
use axum::{
    response::Html,
    routing::{MethodRouter, get},
};

use crate::state::AppState;

macro_rules! page {
    ($title:literal, $body:literal) => {
        concat!(
            "<!doctype html><html><head><meta charset=\"utf-8\"><title>",
            $title,
            "</title></head><body>",
            $body,
            "</body></html>"
        )
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Home,
    Signup,
}

impl View {
    /// GET handler rendering this view.
    pub fn handler(self) -> MethodRouter<AppState> {
        match self {
            View::Login => get(login),
            View::Home => get(home),
            View::Signup => get(signup),
        }
    }
}

pub async fn login() -> Html<&'static str> {
    Html(page!("Login", r#"<main id="login"><h1>Login</h1></main>"#))
}

pub async fn home() -> Html<&'static str> {
    Html(page!("Home", r#"<main id="home"><h1>Home</h1></main>"#))
}

pub async fn signup() -> Html<&'static str> {
    Html(page!("Sign up", r#"<main id="sinup"><h1>Sign up</h1></main>"#))
}
