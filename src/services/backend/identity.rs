//! Session lookup interface used by the route gate.
use async_trait::async_trait;
use thiserror::Error;

pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity lookup failures.
///
/// Note:
/// - Kept apart from "signed out". Callers decide what a failure means
///   (the route gate treats it as signed out).
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity transport error: {0}")]
    Transport(String),
    #[error("identity backend rejected lookup ({status}): {message}")]
    Backend { status: u16, message: String },
    #[error("identity response error: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub uid: String,
}

/// Answer to "is a user currently signed in?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedIn(SessionUser),
    SignedOut,
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }
}

/// Resolves the session behind a credential presented by the browser.
///
/// Implementations must be shareable across requests (`Arc<dyn SessionProvider>`).
#[async_trait]
pub trait SessionProvider: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // `None` / empty credential must resolve to `SignedOut` without I/O.
    async fn current_session(&self, credential: Option<&str>) -> IdentityResult<SessionState>;
}
