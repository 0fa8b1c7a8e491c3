use std::time::Instant;

use timeattack_common::RequestExecutor;
use tracing::{debug, error, trace};

use crate::config::WorkerConfig;
use crate::progress::ProgressTracker;
use crate::report::TaskResult;

/// Substitute `input` for the first `{}` in `template`.
/// A template without a placeholder is sent verbatim for every input.
pub fn format_body(template: &str, input: &str) -> String {
    template.replacen("{}", input, 1)
}

/// Measure all samples for one input, strictly sequentially.
///
/// Each completed exchange contributes one wall-clock sample whatever its
/// status. A failed request contributes no sample and aborts the input's
/// remaining iterations; samples gathered up to that point are kept.
/// Progress is notified once per iteration, the aborting one included.
pub async fn sample_input<E: RequestExecutor>(
    executor: &E,
    config: &WorkerConfig,
    input: &str,
    progress: &ProgressTracker,
) -> TaskResult {
    debug!("Processing input: {} [samples: {}]", input, config.sample_count);

    let mut samples = Vec::with_capacity(config.sample_count);

    for _ in 0..config.sample_count {
        let body = format_body(&config.body_template, input);

        let start = Instant::now();
        let result = executor
            .execute(config.method, &config.api_path, &body)
            .await;
        let elapsed = start.elapsed().as_secs_f64();

        progress.record_sample();

        match result {
            Ok(response) => {
                samples.push(elapsed);
                trace!(
                    "Got response with status: {} and body: {}",
                    response.status,
                    response.body
                );
            }
            Err(e) => {
                error!("Request for input {:?} failed: {}", input, e);
                break;
            }
        }
    }

    debug!("Processing of input: {} finished", input);

    TaskResult {
        input: input.to_string(),
        samples,
    }
}
