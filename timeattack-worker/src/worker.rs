use std::sync::Arc;

use timeattack_client::{ClientConfig, RestClient};
use timeattack_common::{RequestExecutor, Result};
use tokio::sync::Semaphore;
use tracing::{debug, error};

use crate::config::WorkerConfig;
use crate::progress::ProgressTracker;
use crate::report::{RunReport, TaskResult};
use crate::sampler;

/// Schedules one sampling task per input, bounded by a counting semaphore.
///
/// Tasks are spawned eagerly; each acquires a gate permit before doing any
/// work and holds it for the sampler's whole lifetime, so at most
/// `max_concurrent_requests` inputs are ever sampling at once. Results come
/// back in scheduling order, not completion order.
pub struct Worker<E> {
    pub config: WorkerConfig,
    executor: Arc<E>,
    gate: Arc<Semaphore>,
    progress: Arc<ProgressTracker>,
}

impl Worker<RestClient> {
    /// Create a worker backed by the production HTTP client.
    pub fn new(config: WorkerConfig) -> Result<Self> {
        let client = RestClient::new(ClientConfig {
            host: config.host.clone(),
            port: config.port,
            timeout: config.timeout,
        })?;
        Ok(Self::with_executor(config, Arc::new(client)))
    }
}

impl<E: RequestExecutor + 'static> Worker<E> {
    /// Create a worker with a caller-supplied request executor.
    pub fn with_executor(config: WorkerConfig, executor: Arc<E>) -> Self {
        // A zero-permit gate would suspend every sampler forever.
        let permits = config.max_concurrent_requests.max(1);
        Self {
            executor,
            gate: Arc::new(Semaphore::new(permits)),
            progress: Arc::new(ProgressTracker::new()),
            config,
        }
    }

    /// Progress over all samples of the current run.
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Probe every input and collect the results in scheduling order.
    ///
    /// Refuses the run (no tasks spawned) when the configuration cannot
    /// produce one. An empty input list yields an empty report.
    pub async fn run(&self, inputs: &[String]) -> Result<RunReport> {
        self.config.validate()?;

        debug!("Starting worker [body template: {}]", self.config.body_template);

        self.progress.reset(inputs.len() * self.config.sample_count);

        let config = Arc::new(self.config.clone());
        let mut tasks = Vec::with_capacity(inputs.len());

        for input in inputs {
            debug!("Creating task for input: {}", input);

            let gate = Arc::clone(&self.gate);
            let executor = Arc::clone(&self.executor);
            let progress = Arc::clone(&self.progress);
            let config = Arc::clone(&config);
            let task_input = input.clone();

            let handle = tokio::spawn(async move {
                // Held until the sampler finishes; dropping it frees the slot.
                let _permit = gate.acquire_owned().await.expect("gate is never closed");
                sampler::sample_input(&*executor, &config, &task_input, &progress).await
            });

            tasks.push((input.clone(), handle));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for (input, handle) in tasks {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!("Sampling task for input {:?} aborted unexpectedly: {}", input, e);
                    results.push(TaskResult { input, samples: Vec::new() });
                }
            }
        }

        Ok(RunReport { results })
    }
}
