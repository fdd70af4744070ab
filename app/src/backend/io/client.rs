//! HTTP client for the remote journaling API.
//!
//! The remote service owns authentication and keeps a server-side mirror of
//! submitted entries. It is treated as an opaque collaborator: one request,
//! one response, no retries. Failures surface whatever `message`/`error`
//! text the server sent back.

use log::debug;
use reqwest::blocking::{Client, Response};
use shared::{AuthResponse, AuthSession, JournalEntry, LoginRequest, SignupRequest};
use std::time::Duration;
use thiserror::Error;

use crate::backend::domain::models::entry::EntryMapper;
use crate::backend::domain::{AuthApi, EntrySubmitter};

/// Deployed backend host, overridable with the `API_BASE` environment
/// variable
pub const DEFAULT_API_BASE: &str =
    "https://two526-ecc-dieltienslene-backend-app-l7fz.onrender.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote API rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from the `API_BASE` environment variable, falling back
    /// to the deployed host
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url =
            std::env::var("API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `/users/login`
    pub fn login(&self, request: &LoginRequest) -> Result<AuthSession, ApiError> {
        debug!("Signing in {} at {}", request.email, self.base_url);
        let response = self
            .client
            .post(format!("{}/users/login", self.base_url))
            .json(request)
            .send()?;

        Self::decode_session(response)
    }

    /// POST `/users`
    pub fn signup(&self, request: &SignupRequest) -> Result<AuthSession, ApiError> {
        debug!("Creating account {} at {}", request.email, self.base_url);
        let response = self
            .client
            .post(format!("{}/users", self.base_url))
            .json(request)
            .send()?;

        Self::decode_session(response)
    }

    /// POST `/messages` with the entry in its wire shape
    pub fn submit_entry(&self, entry: &JournalEntry) -> Result<(), ApiError> {
        let record = EntryMapper::to_record(entry);
        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .json(&record)
            .send()?;

        if !response.status().is_success() {
            return Err(Self::rejection(response));
        }
        Ok(())
    }

    fn decode_session(response: Response) -> Result<AuthSession, ApiError> {
        if !response.status().is_success() {
            return Err(Self::rejection(response));
        }

        let body: AuthResponse = response.json()?;
        Ok(AuthSession {
            user_id: body.id_string(),
            username: body.username,
        })
    }

    /// Turn a non-success response into an error carrying whatever the
    /// server said: the JSON `message`/`error` field when the body parses,
    /// the raw body text when it doesn't, the bare status when there is no
    /// body at all.
    fn rejection(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let fallback = format!("HTTP {status}");
        let text = response.text().unwrap_or_default();

        let message = match serde_json::from_str::<AuthResponse>(&text) {
            Ok(body) => body.message.or(body.error).unwrap_or_else(|| {
                if text.trim().is_empty() {
                    fallback
                } else {
                    text
                }
            }),
            Err(_) if !text.trim().is_empty() => text,
            Err(_) => fallback,
        };

        ApiError::Rejected { status, message }
    }
}

impl EntrySubmitter for ApiClient {
    fn submit_entry(&self, entry: &JournalEntry) -> anyhow::Result<()> {
        Ok(ApiClient::submit_entry(self, entry)?)
    }
}

impl AuthApi for ApiClient {
    fn login(&self, request: &LoginRequest) -> anyhow::Result<AuthSession> {
        Ok(ApiClient::login(self, request)?)
    }

    fn signup(&self, request: &SignupRequest) -> anyhow::Result<AuthSession> {
        Ok(ApiClient::signup(self, request)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_rejection_messages_render_the_server_text() {
        let error = ApiError::Rejected {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "remote API rejected the request (HTTP 401): Invalid credentials"
        );
    }
}
