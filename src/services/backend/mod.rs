//! Hosted identity/database backend.
//!
//! Built once at startup from [`BackendSettings`] and handed to the rest of the
//! application through `AppState`. Nothing here is global.
pub mod client;
pub mod document_store;
pub mod firebase_auth;
pub mod identity;
pub mod settings;

pub use client::{BackendClient, BackendError};
pub use identity::{SessionProvider, SessionState};
pub use settings::{BackendEndpoints, BackendSettings};
