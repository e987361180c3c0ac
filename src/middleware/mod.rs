/*
 * Responsibility
 * - Middleware entry points
 *   - auth::session: route gate per route
 *   - http / security_headers: applied to the whole Router
 *   - path: case / trailing-slash folding before routing
 */
pub mod auth;
pub mod http;
pub mod path;
pub mod security_headers;
