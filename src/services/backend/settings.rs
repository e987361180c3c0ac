use url::Url;

/// Web app registration of the hosted project (the six values the console hands out).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendSettings {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl BackendSettings {
    /// Returns the name of the first blank field, if any.
    pub fn first_blank(&self) -> Option<&'static str> {
        [
            ("api_key", &self.api_key),
            ("auth_domain", &self.auth_domain),
            ("project_id", &self.project_id),
            ("storage_bucket", &self.storage_bucket),
            ("messaging_sender_id", &self.messaging_sender_id),
            ("app_id", &self.app_id),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Base URLs of the backend REST APIs. Overridable to point at local emulators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendEndpoints {
    pub identity: Url,
    pub firestore: Url,
}

impl BackendEndpoints {
    pub const DEFAULT_IDENTITY: &'static str = "https://identitytoolkit.googleapis.com";
    pub const DEFAULT_FIRESTORE: &'static str = "https://firestore.googleapis.com";
}

/// Join `path` under `base`, keeping every segment of `base`
/// (`http://host/identitytoolkit.googleapis.com` + `v1/x` keeps the prefix).
pub fn join_path(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
}
