use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler as TokioCronScheduler};

use crate::error::{AppError, AppResult};
use crate::scheduler::evaluator::ScheduleEvaluator;

/// Wrapper around tokio-cron-scheduler that fires the tick evaluator on a
/// fixed cron expression. Optional; deployments that trigger ticks through
/// the HTTP endpoint run without it.
pub struct InternalTicker {
    scheduler: Arc<Mutex<TokioCronScheduler>>,
    evaluator: Arc<ScheduleEvaluator>,
    cron: String,
}

impl InternalTicker {
    pub async fn new(evaluator: Arc<ScheduleEvaluator>, cron: String) -> AppResult<Self> {
        let scheduler = TokioCronScheduler::new()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            evaluator,
            cron,
        })
    }

    /// Register the tick job and start the scheduler.
    pub async fn start(&self) -> AppResult<()> {
        let evaluator = Arc::clone(&self.evaluator);

        let tick_job = Job::new_async(self.cron.as_str(), move |_uuid, _lock| {
            let evaluator = Arc::clone(&evaluator);

            Box::pin(async move {
                match evaluator.run_tick().await {
                    Ok(summary) => {
                        if !summary.results.is_empty() {
                            tracing::info!(
                                considered = summary.results.len(),
                                dispatched = summary.dispatched(),
                                "internal tick completed"
                            );
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "internal tick failed");
                    }
                }
            })
        })
        .map_err(|e| AppError::BadRequest {
            message: format!("Invalid cron expression: {}", e),
        })?;

        self.scheduler
            .lock()
            .await
            .add(tick_job)
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;

        self.scheduler
            .lock()
            .await
            .start()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;

        Ok(())
    }

    /// Stop the scheduler gracefully
    pub async fn stop(&self) -> AppResult<()> {
        self.scheduler
            .lock()
            .await
            .shutdown()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;
        Ok(())
    }
}
