//! Route authorization gate: allow the navigation, or send the user to login.
use std::sync::Arc;

use crate::routes::table::{self, RouteDescriptor};
use crate::services::backend::{SessionProvider, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(&'static RouteDescriptor),
}

/// `requires_auth` + signed out → redirect to login; everything else is allowed.
///
/// Signed-in users reaching login/signup are let through as well.
pub fn decide(requires_auth: bool, session: &SessionState) -> Decision {
    if requires_auth && !session.is_signed_in() {
        Decision::Redirect(table::login())
    } else {
        Decision::Allow
    }
}

#[derive(Clone)]
pub struct Gate {
    sessions: Arc<dyn SessionProvider>,
}

impl Gate {
    pub fn new(sessions: Arc<dyn SessionProvider>) -> Self {
        Self { sessions }
    }

    /// Resolve the session behind `credential` (only when the route needs it) and decide.
    ///
    /// Lookup failures count as signed out.
    pub async fn evaluate(&self, route: &RouteDescriptor, credential: Option<&str>) -> Decision {
        if !route.requires_auth {
            return decide(false, &SessionState::SignedOut);
        }

        let session = match self.sessions.current_session(credential).await {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    backend = self.sessions.backend_name(),
                    route = route.name,
                    "session lookup failed; treating as signed out"
                );
                SessionState::SignedOut
            }
        };

        if let SessionState::SignedIn(user) = &session {
            tracing::debug!(uid = %user.uid, "session resolved");
        }

        let decision = decide(route.requires_auth, &session);
        tracing::debug!(route = route.name, ?decision, "route gate");
        decision
    }
}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gate")
            .field("sessions", &self.sessions.backend_name())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeSessions;
    use super::*;
    use crate::services::backend::identity::SessionUser;

    fn signed_in() -> SessionState {
        SessionState::SignedIn(SessionUser { uid: "u".into() })
    }

    fn route(name: &str) -> &'static RouteDescriptor {
        table::all()
            .iter()
            .find(|r| r.name == name)
            .unwrap()
    }

    #[test]
    fn decision_table() {
        let login = Decision::Redirect(table::login());

        assert_eq!(decide(false, &SessionState::SignedOut), Decision::Allow);
        assert_eq!(decide(false, &signed_in()), Decision::Allow);
        assert_eq!(decide(true, &signed_in()), Decision::Allow);
        assert_eq!(decide(true, &SessionState::SignedOut), login);
    }

    #[test]
    fn public_routes_allow_any_session() {
        for route in table::all().iter().filter(|r| !r.requires_auth) {
            for session in [SessionState::SignedOut, signed_in()] {
                assert_eq!(decide(route.requires_auth, &session), Decision::Allow);
            }
        }
    }

    #[test]
    fn gated_routes_never_allow_signed_out() {
        for route in table::all().iter().filter(|r| r.requires_auth) {
            assert_eq!(
                decide(route.requires_auth, &SessionState::SignedOut),
                Decision::Redirect(table::login())
            );
            assert_eq!(decide(route.requires_auth, &signed_in()), Decision::Allow);
        }
    }

    #[tokio::test]
    async fn home_signed_out_redirects_to_login() {
        let gate = Gate::new(Arc::new(FakeSessions::accepting("tok")));

        assert_eq!(
            gate.evaluate(route("home"), None).await,
            Decision::Redirect(table::login())
        );
        assert_eq!(
            gate.evaluate(route("home"), Some("stale")).await,
            Decision::Redirect(table::login())
        );
    }

    #[tokio::test]
    async fn home_signed_in_is_allowed() {
        let gate = Gate::new(Arc::new(FakeSessions::accepting("tok")));
        assert_eq!(gate.evaluate(route("home"), Some("tok")).await, Decision::Allow);
    }

    #[tokio::test]
    async fn login_and_signup_do_not_consult_sessions() {
        let sessions = Arc::new(FakeSessions::accepting("tok"));
        let gate = Gate::new(sessions.clone());

        assert_eq!(gate.evaluate(route("login"), None).await, Decision::Allow);
        assert_eq!(gate.evaluate(route("sinup"), Some("tok")).await, Decision::Allow);
        assert_eq!(sessions.lookups(), 0);
    }

    #[tokio::test]
    async fn lookup_failure_fails_closed() {
        let gate = Gate::new(Arc::new(FakeSessions::failing()));

        assert_eq!(
            gate.evaluate(route("home"), Some("tok")).await,
            Decision::Redirect(table::login())
        );
        assert_eq!(gate.evaluate(route("login"), Some("tok")).await, Decision::Allow);
    }

    #[tokio::test]
    async fn evaluation_is_idempotent() {
        let gate = Gate::new(Arc::new(FakeSessions::accepting("tok")));

        for credential in [None, Some("tok")] {
            let first = gate.evaluate(route("home"), credential).await;
            let second = gate.evaluate(route("home"), credential).await;
            assert_eq!(first, second);
        }
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn signed_in_debug_log_names_uid_only() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let gate = Gate::new(Arc::new(FakeSessions::accepting("tok")));
        assert_eq!(gate.evaluate(route("home"), Some("tok")).await, Decision::Allow);

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("uid=user-1"), "{logs}");
        assert!(!logs.contains("email"), "{logs}");
        assert!(!logs.contains('@'), "{logs}");
    }
}
