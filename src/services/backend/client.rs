/*
 * Responsibility
 * - Build the backend handles (auth + document store) once, at startup
 * - Cheap to clone; AppState carries it to whoever needs it
 */
use std::sync::Arc;

use thiserror::Error;

use crate::services::backend::{
    document_store::DocumentStore,
    firebase_auth::FirebaseAuth,
    identity::SessionProvider,
    settings::{BackendEndpoints, BackendSettings},
};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend setting is blank: {0}")]
    BlankSetting(&'static str),
    #[error("backend endpoint error: {0}")]
    Endpoint(#[from] url::ParseError),
}

#[derive(Clone, Debug)]
pub struct BackendClient {
    settings: Arc<BackendSettings>,
    auth: Arc<FirebaseAuth>,
    store: DocumentStore,
}

impl BackendClient {
    pub fn initialize(
        settings: BackendSettings,
        endpoints: &BackendEndpoints,
        http: reqwest::Client,
    ) -> Result<Self, BackendError> {
        if let Some(field) = settings.first_blank() {
            return Err(BackendError::BlankSetting(field));
        }

        let auth = FirebaseAuth::new(http, &endpoints.identity, &settings.api_key)?;
        let store = DocumentStore::new(&endpoints.firestore, &settings.project_id)?;

        Ok(Self {
            settings: Arc::new(settings),
            auth: Arc::new(auth),
            store,
        })
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    /// Authentication handle, as the session provider the route gate consumes.
    pub fn auth(&self) -> Arc<dyn SessionProvider> {
        self.auth.clone()
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }
}
