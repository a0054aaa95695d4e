use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{BackendLoginResponse, LoginRequest};

/// Message shown when the backend rejects a login without saying why.
pub const DEFAULT_REJECTION: &str = "Invalid credentials, please try again.";

/// BackendError
///
/// `Rejected` means the backend answered and said no; `Transport` means it could not be
/// reached or answered with something unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Transport(String),
}

/// BackendApi
///
/// The slice of the library backend this service calls itself. Page views talk to the
/// backend directly and are not routed through here. The backend remains the authority
/// on every permission; nothing returned here widens what a page may load.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Exchanges credentials for the user's role and identity.
    async fn login(&self, request: &LoginRequest) -> Result<BackendLoginResponse, BackendError>;
}

pub type BackendState = Arc<dyn BackendApi>;

/// HttpBackend
///
/// `reqwest` implementation against `{API_BASE}/api`.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl HttpBackend {
    pub fn new(api_base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/api", api_base.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<BackendLoginResponse, BackendError> {
        let url = format!("{}/auth/login", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            // Prefer the backend's own wording: `message`, then `error`.
            let message = response
                .json::<BackendErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message.or(body.error))
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
            return Err(BackendError::Rejected(message));
        }
        if !status.is_success() {
            return Err(BackendError::Transport(format!(
                "login returned {status}"
            )));
        }

        response
            .json::<BackendLoginResponse>()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))
    }
}
