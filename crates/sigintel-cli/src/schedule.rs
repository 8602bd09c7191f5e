//! `schedule` command: run the three jobs on cron schedules in one process.
//!
//! All jobs share one lock so two cycles never touch the state files at the
//! same time. A job that fires while another holds the lock waits for it.

use std::sync::Arc;

use sigintel_core::AppConfig;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::{feedback, people, signals};

#[derive(Debug, Clone, Copy)]
enum JobKind {
    Signals,
    Feedback,
    People,
}

impl JobKind {
    fn name(self) -> &'static str {
        match self {
            JobKind::Signals => "signals",
            JobKind::Feedback => "feedback",
            JobKind::People => "people",
        }
    }

    fn cron(self, config: &AppConfig) -> &str {
        match self {
            JobKind::Signals => &config.signals_cron,
            JobKind::Feedback => &config.feedback_cron,
            JobKind::People => &config.people_cron,
        }
    }
}

/// Start the scheduler and block until ctrl-c or SIGTERM.
///
/// # Errors
///
/// Returns an error if a cron expression is invalid or the scheduler cannot
/// be started or shut down.
pub(crate) async fn run_schedule(config: Arc<AppConfig>, commit: bool) -> anyhow::Result<()> {
    let mut scheduler = build_scheduler(config, commit).await?;
    shutdown_signal().await;
    scheduler.shutdown().await?;
    Ok(())
}

/// Builds and starts the scheduler with all three jobs registered.
///
/// The returned handle must be kept alive; dropping it stops the jobs.
async fn build_scheduler(
    config: Arc<AppConfig>,
    commit: bool,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    let lock = Arc::new(Mutex::new(()));

    for kind in [JobKind::Signals, JobKind::Feedback, JobKind::People] {
        register_job(&scheduler, kind, Arc::clone(&config), Arc::clone(&lock), commit).await?;
    }

    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_job(
    scheduler: &JobScheduler,
    kind: JobKind,
    config: Arc<AppConfig>,
    lock: Arc<Mutex<()>>,
    commit: bool,
) -> Result<(), JobSchedulerError> {
    let cron = kind.cron(&config).to_string();

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let config = Arc::clone(&config);
        let lock = Arc::clone(&lock);

        Box::pin(async move {
            let _guard = lock.lock().await;
            tracing::info!(job = kind.name(), "scheduler: starting run");
            let result = match kind {
                JobKind::Signals => signals::run_signals(&config, false, commit).await,
                JobKind::Feedback => feedback::run_feedback(&config, false, commit).await,
                JobKind::People => people::run_people(&config, false, commit).await,
            };
            match result {
                Ok(()) => tracing::info!(job = kind.name(), "scheduler: run complete"),
                Err(e) => tracing::error!(
                    job = kind.name(),
                    error = %format!("{e:#}"),
                    "scheduler: run failed"
                ),
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(job = kind.name(), cron = %cron, "scheduler: registered job");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}
