//! # feedlint-fetch
//!
//! Document retrieval over an authenticated transport.
//!
//! The retriever owns three concerns:
//! - authentication: none, basic credentials, bearer token, OAuth2
//!   client-credentials (token cached per run), or a static header set
//! - deadlines: a per-request timeout bounded by the caller's run deadline;
//!   an expired deadline fails fast instead of hanging
//! - outcome classification: `Found`, `NotFound` (a successful negative),
//!   or `Failed` — a missing optional document is not an error, a missing
//!   required one is, and that decision belongs to the caller
//!
//! The HTTP stack itself sits behind the [`Transport`] trait; production
//! uses [`HttpTransport`] (reqwest), tests use [`StaticTransport`].

pub mod auth;
pub mod deadline;
pub mod fetcher;
pub mod transport;

pub use auth::AuthConfig;
pub use deadline::Deadline;
pub use fetcher::{Fetcher, build_feed_url};
pub use transport::{
    HttpTransport, RequestMethod, StaticTransport, Transport, TransportRequest, TransportResponse,
};

use thiserror::Error;

/// Why a fetch failed. Distinct from `NotFound`, which is a successful
/// negative result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status code: {0}")]
    Status(u16),
    #[error("request timed out")]
    Timeout,
    #[error("run deadline exceeded")]
    DeadlineExceeded,
    #[error("token exchange failed: {0}")]
    TokenExchange(String),
}

/// The tri-state result of one retrieval attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found { status: u16, body: Vec<u8> },
    NotFound { status: u16 },
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn exists(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Found { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}
