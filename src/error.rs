use reqwest::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    #[error("no credential supplied")]
    MissingCredential,
    #[error("credential has no access token")]
    MissingAccessToken,
    #[error("token exchange failed: {0}")]
    TokenExchange(String),
    #[error("token exchange returned an empty api token")]
    EmptyApiToken,
    #[error("http client init failed: {0}")]
    ClientBuild(String),
    #[error("request build failed: {0}")]
    RequestBuild(String),
    #[error("discovery cancelled")]
    Cancelled,
    #[error("discovery deadline exceeded")]
    DeadlineExceeded,
    #[error("no model list after {attempts} attempts")]
    Exhausted { attempts: usize },
}

impl DiscoveryError {
    /// Expected outcomes the caller answers with its own fallback list.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential
                | Self::MissingAccessToken
                | Self::TokenExchange(_)
                | Self::EmptyApiToken
                | Self::Exhausted { .. }
        )
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::MissingAccessToken => "missing_access_token",
            Self::TokenExchange(_) => "token_exchange_failed",
            Self::EmptyApiToken => "empty_api_token",
            Self::ClientBuild(_) => "http_client_init_failed",
            Self::RequestBuild(_) => "request_build_failed",
            Self::Cancelled => "cancelled",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::Exhausted { .. } => "exhausted",
        }
    }
}

/// Why a single candidate path produced no models. Always retried on the
/// next path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("body read failed: {0}")]
    BodyRead(String),
    #[error("upstream status {0}")]
    Status(StatusCode),
    #[error("no models in response")]
    Empty,
}
