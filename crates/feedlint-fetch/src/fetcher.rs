//! The fetcher: authenticated retrieval with deadline enforcement.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::auth::{AuthConfig, basic_authorization, bearer_authorization};
use crate::deadline::Deadline;
use crate::transport::{Transport, TransportRequest};
use crate::{FetchError, FetchOutcome};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!("feedlint/", env!("CARGO_PKG_VERSION"));

/// Retrieves named remote documents.
///
/// Stateless across fetches except for the OAuth access token, which is
/// exchanged at most once per run: concurrent workers race to the same
/// `OnceCell` and the first exchange wins. A failed exchange is cached too,
/// so every subsequent fetch surfaces the same failure instead of retrying.
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    auth: AuthConfig,
    user_agent: String,
    request_timeout: Duration,
    token: OnceCell<Result<String, FetchError>>,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            auth: AuthConfig::None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            token: OnceCell::new(),
        }
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Fetch one document. Never panics, never hangs past the deadline.
    pub async fn fetch(&self, url: &str, deadline: Deadline) -> FetchOutcome {
        if deadline.expired() {
            return FetchOutcome::Failed(FetchError::DeadlineExceeded);
        }

        let mut request = TransportRequest::get(url)
            .header("User-Agent", self.user_agent.clone())
            .header("Accept", "application/json");
        request = match self.apply_auth(request, deadline).await {
            Ok(request) => request,
            Err(err) => return FetchOutcome::Failed(err),
        };

        let outcome = match self.send_within_deadline(request, deadline).await {
            Ok(response) => match response.status {
                404 => FetchOutcome::NotFound {
                    status: response.status,
                },
                status if (200..300).contains(&status) => FetchOutcome::Found {
                    status,
                    body: response.body,
                },
                status => FetchOutcome::Failed(FetchError::Status(status)),
            },
            Err(err) => FetchOutcome::Failed(err),
        };

        debug!(url, exists = outcome.exists(), "fetched document");
        outcome
    }

    async fn send_within_deadline(
        &self,
        request: TransportRequest,
        deadline: Deadline,
    ) -> Result<crate::transport::TransportResponse, FetchError> {
        let budget = deadline.cap(self.request_timeout);
        match tokio::time::timeout(budget, self.transport.send(request)).await {
            Ok(result) => result,
            Err(_) if deadline.expired() => Err(FetchError::DeadlineExceeded),
            Err(_) => Err(FetchError::Timeout),
        }
    }

    async fn apply_auth(
        &self,
        request: TransportRequest,
        deadline: Deadline,
    ) -> Result<TransportRequest, FetchError> {
        match &self.auth {
            AuthConfig::None => Ok(request),
            AuthConfig::BasicAuth { user, password } => {
                Ok(request.header("Authorization", basic_authorization(user, password)))
            }
            AuthConfig::BearerToken { token } => {
                Ok(request.header("Authorization", bearer_authorization(token)))
            }
            AuthConfig::OauthClientCredentialsGrant {
                user,
                password,
                token_url,
            } => {
                let token = self
                    .token
                    .get_or_init(|| self.exchange_token(user, password, token_url, deadline))
                    .await
                    .clone()?;
                Ok(request.header("Authorization", bearer_authorization(&token)))
            }
            AuthConfig::Headers { headers } => {
                let mut request = request;
                for pair in headers {
                    if !pair.key.is_empty() && !pair.value.is_empty() {
                        request = request.header(pair.key.clone(), pair.value.clone());
                    }
                }
                Ok(request)
            }
        }
    }

    async fn exchange_token(
        &self,
        user: &str,
        password: &str,
        token_url: &str,
        deadline: Deadline,
    ) -> Result<String, FetchError> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        debug!(token_url, "exchanging client credentials for access token");
        let request = TransportRequest::post(token_url, "grant_type=client_credentials")
            .header("Authorization", basic_authorization(user, password));

        let response = self
            .send_within_deadline(request, deadline)
            .await
            .map_err(|e| FetchError::TokenExchange(e.to_string()))?;
        if !(200..300).contains(&response.status) {
            return Err(FetchError::TokenExchange(format!(
                "token endpoint returned status {}",
                response.status
            )));
        }

        let parsed: TokenResponse = serde_json::from_slice(&response.body)
            .map_err(|e| FetchError::TokenExchange(format!("invalid token response: {e}")))?;
        Ok(parsed.access_token)
    }
}

/// Derive the conventional URL of a sibling document from a base URL.
///
/// Used for the single manifest-URL fallback: `https://x/gbfs.json` and
/// `https://x/` both map `system_information` to
/// `https://x/system_information.json`.
pub fn build_feed_url(base_url: &str, feed_name: &str) -> String {
    if let Some(prefix) = base_url.strip_suffix("gbfs.json") {
        return format!("{prefix}{feed_name}.json");
    }
    if base_url.ends_with('/') {
        return format!("{base_url}{feed_name}.json");
    }
    format!("{base_url}/{feed_name}.json")
}
