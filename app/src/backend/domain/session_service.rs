//! Session state: who is signed in, and the remembered credentials used to
//! prefill the login form.
//!
//! The remote API owns authentication; this service only orchestrates the
//! calls and keeps the resulting identity in the key-value store.

use anyhow::{anyhow, Result};
use log::info;
use shared::{AuthSession, LoginRequest, SignupRequest};
use std::sync::Arc;

use crate::backend::storage::KeyValueStore;

const LOGGED_IN_KEY: &str = "loggedIn";
const USER_ID_KEY: &str = "userId";
const SAVED_EMAIL_KEY: &str = "savedEmail";
const SAVED_PASSWORD_KEY: &str = "savedPassword";
const USERNAME_KEY: &str = "username";

/// Seam for the remote auth endpoints, implemented by the io-layer client
/// and by test stubs.
pub trait AuthApi {
    fn login(&self, request: &LoginRequest) -> Result<AuthSession>;
    fn signup(&self, request: &SignupRequest) -> Result<AuthSession>;
}

#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.store.get(LOGGED_IN_KEY), Ok(Some(value)) if value == "true")
    }

    /// Remembered email and password, for prefilling the login form
    pub fn saved_credentials(&self) -> (Option<String>, Option<String>) {
        (
            self.store.get(SAVED_EMAIL_KEY).unwrap_or(None),
            self.store.get(SAVED_PASSWORD_KEY).unwrap_or(None),
        )
    }

    pub fn username(&self) -> Option<String> {
        self.store.get(USERNAME_KEY).unwrap_or(None)
    }

    pub fn user_id(&self) -> Option<String> {
        self.store.get(USER_ID_KEY).unwrap_or(None)
    }

    /// Sign in against the remote API and persist the session.
    ///
    /// The email is normalized (trimmed, lowercased) before it goes over the
    /// wire, and the normalized form is what gets remembered. The display
    /// username falls back from the server's answer to the previously stored
    /// one, and finally to the email's local part.
    pub fn login(&self, api: &dyn AuthApi, email: &str, password: &str) -> Result<AuthSession> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(anyhow!("Please enter email and password"));
        }
        let normalized_email = email.to_lowercase();

        let session = api.login(&LoginRequest {
            email: normalized_email.clone(),
            password: password.to_string(),
        })?;

        self.store.set(LOGGED_IN_KEY, "true")?;
        if let Some(user_id) = &session.user_id {
            self.store.set(USER_ID_KEY, user_id)?;
        }
        self.store.set(SAVED_EMAIL_KEY, &normalized_email)?;
        self.store.set(SAVED_PASSWORD_KEY, password)?;

        let username = session
            .username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| self.username())
            .unwrap_or_else(|| email_local_part(&normalized_email));
        self.store.set(USERNAME_KEY, &username)?;

        info!("Signed in as {username}");
        Ok(session)
    }

    /// Create an account against the remote API and persist the session
    pub fn signup(&self, api: &dyn AuthApi, request: &SignupRequest) -> Result<AuthSession> {
        if request.username.is_empty()
            || request.name.is_empty()
            || request.email.is_empty()
            || request.password.is_empty()
        {
            return Err(anyhow!("Please complete all fields"));
        }

        let session = api.signup(request)?;

        self.store.set(LOGGED_IN_KEY, "true")?;
        if let Some(user_id) = &session.user_id {
            self.store.set(USER_ID_KEY, user_id)?;
        }

        Ok(session)
    }

    /// Sign out. Remembered credentials stay behind so the next login form
    /// can be prefilled.
    pub fn log_out(&self) -> Result<()> {
        self.store.remove(LOGGED_IN_KEY)?;
        self.store.remove(USER_ID_KEY)?;
        Ok(())
    }
}

fn email_local_part(email: &str) -> String {
    match email.split('@').next() {
        Some(local) if !local.is_empty() => local.to_string(),
        _ => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::MemoryKeyValueStore;

    struct StubAuthApi {
        session: AuthSession,
    }

    impl AuthApi for StubAuthApi {
        fn login(&self, _request: &LoginRequest) -> Result<AuthSession> {
            Ok(self.session.clone())
        }

        fn signup(&self, _request: &SignupRequest) -> Result<AuthSession> {
            Ok(self.session.clone())
        }
    }

    struct RejectingAuthApi;

    impl AuthApi for RejectingAuthApi {
        fn login(&self, _request: &LoginRequest) -> Result<AuthSession> {
            Err(anyhow!("Invalid credentials"))
        }

        fn signup(&self, _request: &SignupRequest) -> Result<AuthSession> {
            Err(anyhow!("Email already registered"))
        }
    }

    fn service() -> (SessionService, Arc<MemoryKeyValueStore>) {
        let store = Arc::new(MemoryKeyValueStore::new());
        (SessionService::new(store.clone()), store)
    }

    #[test]
    fn test_login_persists_the_session() {
        let (service, store) = service();
        let api = StubAuthApi {
            session: AuthSession {
                user_id: Some("42".to_string()),
                username: Some("lene".to_string()),
            },
        };

        service.login(&api, "  Lene@Example.COM ", "hunter2").unwrap();

        assert!(service.is_logged_in());
        assert_eq!(service.user_id(), Some("42".to_string()));
        assert_eq!(service.username(), Some("lene".to_string()));
        assert_eq!(
            service.saved_credentials(),
            (
                Some("lene@example.com".to_string()),
                Some("hunter2".to_string())
            )
        );
        assert_eq!(
            store.get("savedEmail").unwrap(),
            Some("lene@example.com".to_string())
        );
    }

    #[test]
    fn test_login_rejects_blank_input_without_calling_the_api() {
        let (service, _store) = service();

        assert!(service.login(&RejectingAuthApi, "  ", "pw").is_err());
        assert!(service
            .login(&RejectingAuthApi, "lene@example.com", "")
            .is_err());
        assert!(!service.is_logged_in());
    }

    #[test]
    fn test_failed_login_leaves_no_session_behind() {
        let (service, _store) = service();

        assert!(service
            .login(&RejectingAuthApi, "lene@example.com", "wrong")
            .is_err());
        assert!(!service.is_logged_in());
        assert_eq!(service.saved_credentials(), (None, None));
    }

    #[test]
    fn test_username_falls_back_to_stored_then_email_local_part() {
        let (service, store) = service();
        let api = StubAuthApi {
            session: AuthSession {
                user_id: Some("42".to_string()),
                username: None,
            },
        };

        // No server username, no stored one: email local part wins
        service.login(&api, "lene@example.com", "pw").unwrap();
        assert_eq!(service.username(), Some("lene".to_string()));

        // A previously stored username takes precedence over the local part
        store.set("username", "rosie").unwrap();
        service.login(&api, "lene@example.com", "pw").unwrap();
        assert_eq!(service.username(), Some("rosie".to_string()));

        // A whitespace-only server username is treated as absent
        let blank_api = StubAuthApi {
            session: AuthSession {
                user_id: None,
                username: Some("   ".to_string()),
            },
        };
        service.login(&blank_api, "lene@example.com", "pw").unwrap();
        assert_eq!(service.username(), Some("rosie".to_string()));
    }

    #[test]
    fn test_signup_requires_every_field() {
        let (service, _store) = service();
        let api = StubAuthApi {
            session: AuthSession::default(),
        };

        let incomplete = SignupRequest {
            username: "lene".to_string(),
            name: String::new(),
            email: "lene@example.com".to_string(),
            password: "pw".to_string(),
        };
        assert!(service.signup(&api, &incomplete).is_err());

        let complete = SignupRequest {
            name: "Lene".to_string(),
            ..incomplete
        };
        service.signup(&api, &complete).unwrap();
        assert!(service.is_logged_in());
    }

    #[test]
    fn test_log_out_keeps_remembered_credentials() {
        let (service, _store) = service();
        let api = StubAuthApi {
            session: AuthSession {
                user_id: Some("42".to_string()),
                username: Some("lene".to_string()),
            },
        };
        service.login(&api, "lene@example.com", "hunter2").unwrap();

        service.log_out().unwrap();

        assert!(!service.is_logged_in());
        assert_eq!(service.user_id(), None);
        assert_eq!(
            service.saved_credentials(),
            (
                Some("lene@example.com".to_string()),
                Some("hunter2".to_string())
            )
        );
    }
}
