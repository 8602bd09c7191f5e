mod feedback;
mod git;
mod people;
mod schedule;
mod signals;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sigintel")]
#[command(about = "Signal intelligence: collect, rank, publish, and learn from feedback")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect candidates, rank the fresh ones, and publish a digest issue
    Signals {
        /// Show fresh candidates without ranking, publishing, or saving state
        #[arg(long)]
        dry_run: bool,

        /// Commit and push the updated signal store
        #[arg(long)]
        commit: bool,
    },
    /// Harvest reactions on recent digests and update the ranking policy
    Feedback {
        /// Print the preference summary without writing any files
        #[arg(long)]
        dry_run: bool,

        /// Commit and push the updated policy and summary
        #[arg(long)]
        commit: bool,
    },
    /// Score contributors of the watched repositories
    People {
        /// Print the report instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Commit and push the updated report
        #[arg(long)]
        commit: bool,
    },
    /// Run all three jobs on their cron schedules until interrupted
    Schedule {
        /// Commit and push state after each scheduled run
        #[arg(long)]
        commit: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("no command given; run `sigintel --help` for usage");
        return Ok(());
    };

    let config = Arc::new(sigintel_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Signals { dry_run, commit } => {
            signals::run_signals(&config, dry_run, commit).await?;
        }
        Commands::Feedback { dry_run, commit } => {
            feedback::run_feedback(&config, dry_run, commit).await?;
        }
        Commands::People { dry_run, commit } => {
            people::run_people(&config, dry_run, commit).await?;
        }
        Commands::Schedule { commit } => {
            schedule::run_schedule(config, commit).await?;
        }
    }

    Ok(())
}

/// GitHub client for the configured API endpoint and token.
pub(crate) fn github_client(
    config: &sigintel_core::AppConfig,
) -> anyhow::Result<sigintel_github::GithubClient> {
    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set; GitHub requests are unauthenticated");
    }
    let client = sigintel_github::GithubClient::with_base_url(
        config.github_token.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
        &config.github_api_url,
    )?;
    Ok(client)
}
