/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - gate: route authorization gate (holds the session provider)
 *   - where routes are mounted / which cookie carries the session
 * - Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::routes::{gate::Gate, table::RouteDescriptor};

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: Gate,
    pub base_path: Arc<str>,
    pub session_cookie: Arc<str>,
}

impl AppState {
    pub fn new(gate: Gate, base_path: &str, session_cookie: &str) -> Self {
        Self {
            gate,
            base_path: Arc::from(base_path),
            session_cookie: Arc::from(session_cookie),
        }
    }

    /// Browser-facing path of `route` (base path included).
    pub fn href(&self, route: &RouteDescriptor) -> String {
        if &*self.base_path == "/" {
            route.path.to_string()
        } else {
            format!("{}{}", self.base_path, route.path)
        }
    }
}
