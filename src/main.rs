use std::path::PathBuf;

use clap::Parser;

use jobtracker::config::Config;
use jobtracker::service::{JobPipeline, TelegramNotifier};

/// Career-page job posting tracker.
#[derive(Debug, Parser)]
#[command(name = "jobtracker", version)]
struct Args {
    /// Company list CSV (company,url)
    #[arg(long, default_value = "companies.csv")]
    companies: PathBuf,

    /// Configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the job database path from the config file
    #[arg(long)]
    database: Option<PathBuf>,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jobtracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .compact()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();
    let args = Args::parse();

    let config = Config::load_or_default(&args.config);
    let store_path = args
        .database
        .unwrap_or_else(|| PathBuf::from(&config.database.path));
    let notifier = TelegramNotifier::from_env(&config.notifications);

    let pipeline = match JobPipeline::new(config, store_path, notifier) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            // The one genuinely unrecoverable startup failure: no HTTP client
            tracing::error!("[RUN] Failed to initialize pipeline: {:#}", e);
            std::process::exit(1);
        }
    };

    let stats = pipeline.run(&args.companies).await;
    tracing::info!(
        "[RUN] New jobs: {}, Total jobs: {}, Errors: {}",
        stats.new_jobs,
        stats.total_jobs,
        stats.errors
    );
}
