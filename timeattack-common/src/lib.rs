use async_trait::async_trait;
use thiserror::Error;

/// Error types for timeattack operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeAttackError {
    #[error("API path cannot be empty")]
    EmptyEndpoint,

    #[error("Body format template cannot be empty")]
    EmptyBodyTemplate,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Result type for timeattack operations
pub type Result<T> = std::result::Result<T, TimeAttackError>;

/// HTTP method used when probing the target endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    /// Parse a method name as given on the command line.
    pub fn from_name(name: &str) -> Option<RequestMethod> {
        match name {
            "get" => Some(RequestMethod::Get),
            "post" => Some(RequestMethod::Post),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
        }
    }
}

/// Status and body of a completed HTTP exchange.
/// A non-2xx status is still a completed exchange (and a usable timing
/// signal), not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// One-request HTTP executor invoked by sampling tasks.
///
/// Implementations are called concurrently by up to `max_concurrent_requests`
/// tasks and must not hold mutable state shared across calls: either stay
/// internally synchronized or open a fresh connection per invocation.
/// `Err` means the exchange never completed (connect failure, timeout,
/// protocol error); a completed exchange is `Ok` whatever its status.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Issue one request. `body` is sent for POST and ignored for GET.
    async fn execute(&self, method: RequestMethod, endpoint: &str, body: &str)
        -> Result<HttpResponse>;
}
