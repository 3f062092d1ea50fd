//! Background generation with cancellation.
//!
//! A generation can run for minutes. [`GenerationWorker::spawn`] moves the
//! request onto a tokio task and hands back a [`GenerationHandle`]. Calling
//! [`GenerationHandle::cancel`] or dropping the handle drops the in-flight
//! HTTP future.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::infrastructure::ports::{Generated, GenerationRequest, LlmError, LlmPort};

/// Spawns generations on the tokio runtime.
#[derive(Clone)]
pub struct GenerationWorker {
    llm: Arc<dyn LlmPort>,
    shutdown: CancellationToken,
}

impl GenerationWorker {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self {
            llm,
            shutdown: CancellationToken::new(),
        }
    }

    /// Ties every spawned generation to `shutdown`: cancelling it cancels them all.
    pub fn with_shutdown(llm: Arc<dyn LlmPort>, shutdown: CancellationToken) -> Self {
        Self { llm, shutdown }
    }

    /// Start one generation. Exactly one request runs per handle.
    pub fn spawn(&self, request: GenerationRequest) -> GenerationHandle {
        let cancel = self.shutdown.child_token();
        let token = cancel.clone();
        let llm = Arc::clone(&self.llm);

        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::info!("Generation cancelled before completion");
                    Err(LlmError::Cancelled)
                }
                result = llm.generate(request) => result,
            }
        });

        GenerationHandle {
            _guard: cancel.clone().drop_guard(),
            cancel,
            task,
        }
    }
}

/// A running generation. Dropping the handle cancels it.
pub struct GenerationHandle {
    cancel: CancellationToken,
    task: JoinHandle<Result<Generated, LlmError>>,
    _guard: DropGuard,
}

impl GenerationHandle {
    /// Abort the request. Idempotent; a finished generation keeps its result.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the result. A cancelled generation yields [`LlmError::Cancelled`].
    pub async fn wait(self) -> Result<Generated, LlmError> {
        let Self { task, _guard, .. } = self;
        match task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(LlmError::Cancelled),
            Err(e) => {
                tracing::error!(error = %e, "Generation task panicked");
                Err(LlmError::RequestFailed(format!("generation task failed: {}", e)))
            }
        }
    }
}
