/*
 * Responsibility
 * - Startup failures (config / backend / listener), surfaced from app::run()
 *
 * Page requests have no error path of their own: the gate is total and
 * session lookup failures are folded into "signed out".
 */
use thiserror::Error;

use crate::config::ConfigError;
use crate::services::backend::BackendError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
