use std::time::Duration;

use timeattack_common::{RequestMethod, Result, TimeAttackError};

use crate::reducer::Reducer;

pub const DEFAULT_SAMPLE_COUNT: usize = 1;
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 5;
pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Parameters for one probing run; immutable once the run starts
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub host: String,
    pub port: u16,
    /// Per-request timeout, applied uniformly by the request executor.
    pub timeout: Duration,
    /// Path of the probed endpoint, e.g. `/login`.
    pub api_path: String,
    pub method: RequestMethod,
    /// Request body template; the first `{}` is replaced with the probed input.
    pub body_template: String,
    /// Requests issued per input, strictly sequential within one input.
    pub sample_count: usize,
    /// Upper bound on concurrently sampling inputs. Must be at least 1;
    /// the gate clamps lower values to 1 rather than deadlocking.
    pub max_concurrent_requests: usize,
    /// Reduction used to rank inputs in the final report.
    pub reducer: Reducer,
}

impl WorkerConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            api_path: "/".to_string(),
            method: RequestMethod::Post,
            body_template: String::new(),
            sample_count: DEFAULT_SAMPLE_COUNT,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            reducer: Reducer::Average,
        }
    }

    /// Refuse configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if self.api_path.is_empty() {
            return Err(TimeAttackError::EmptyEndpoint);
        }
        if self.body_template.is_empty() {
            return Err(TimeAttackError::EmptyBodyTemplate);
        }
        Ok(())
    }
}
