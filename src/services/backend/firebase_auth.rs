use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::services::backend::identity::{
    IdentityError, IdentityResult, SessionProvider, SessionState, SessionUser,
};
use crate::services::backend::settings::join_path;

/// Authentication handle backed by the hosted Identity Toolkit REST API.
///
/// The browser keeps the ID token it got at sign-in in the session cookie;
/// `accounts:lookup` tells us whether that token still belongs to a user.
#[derive(Clone, Debug)]
pub struct FirebaseAuth {
    http: reqwest::Client,
    lookup_url: Url,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

// Lookup rejections that just mean "nobody is signed in with this token".
const SIGNED_OUT_CODES: [&str; 4] = [
    "INVALID_ID_TOKEN",
    "TOKEN_EXPIRED",
    "USER_NOT_FOUND",
    "USER_DISABLED",
];

impl FirebaseAuth {
    pub fn new(http: reqwest::Client, endpoint: &Url, api_key: &str) -> Result<Self, url::ParseError> {
        let mut lookup_url = join_path(endpoint, "v1/accounts:lookup")?;
        lookup_url.query_pairs_mut().append_pair("key", api_key);

        Ok(Self { http, lookup_url })
    }
}

/// Map a raw `accounts:lookup` answer to a session state.
fn interpret_lookup(status: u16, body: &[u8]) -> IdentityResult<SessionState> {
    if (200..300).contains(&status) {
        let parsed: LookupResponse = serde_json::from_slice(body)
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;

        return Ok(match parsed.users.into_iter().next() {
            Some(user) => SessionState::SignedIn(SessionUser { uid: user.local_id }),
            None => SessionState::SignedOut,
        });
    }

    let message = serde_json::from_slice::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());

    // Messages look like "TOKEN_EXPIRED" or "INVALID_ID_TOKEN : detail".
    let code = message
        .split(|c: char| c == ' ' || c == ':')
        .next()
        .unwrap_or_default();

    if status == 400 && SIGNED_OUT_CODES.contains(&code) {
        return Ok(SessionState::SignedOut);
    }

    Err(IdentityError::Backend { status, message })
}

#[async_trait]
impl SessionProvider for FirebaseAuth {
    fn backend_name(&self) -> &'static str {
        "firebase-auth"
    }

    async fn current_session(&self, credential: Option<&str>) -> IdentityResult<SessionState> {
        let Some(id_token) = credential.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(SessionState::SignedOut);
        };

        let resp = self
            .http
            .post(self.lookup_url.clone())
            .json(&json!({ "idToken": id_token }))
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        interpret_lookup(status, &body)
    }
}
