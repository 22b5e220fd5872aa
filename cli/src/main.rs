mod cli;
mod config;

use checkrun_core::{CommandExecutor, ExecutionRequest, Executor, FALLBACK_EXIT_STATUS};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = cli::Args::parse();
    let cfg = match config::load_default() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(FALLBACK_EXIT_STATUS);
        }
    };

    let request = ExecutionRequest {
        command: args.command,
        env: args.env,
        input: args.input,
        timeout: args.timeout.unwrap_or(cfg.defaults.timeout),
        name: args.name,
        in_progress: None,
    };

    let executor = CommandExecutor::new();
    match executor.execute(request).await {
        Ok(response) => {
            print!("{}", response.output);
            tracing::debug!(
                status = response.status,
                duration = response.duration,
                "execution finished"
            );
            std::process::exit(response.status);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(FALLBACK_EXIT_STATUS);
        }
    }
}
