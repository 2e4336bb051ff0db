//! ucli - generic REST CLI
//!
//! Turns `<operation> <resource>... [--flag value]...` into one HTTP request
//! against the URL from `configuration.yaml`.

mod api;
mod cli;
mod config;
mod error;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::{Action, ApiClient};
use crate::cli::{Cli, Invocation};
use crate::config::Config;
use crate::error::UcliError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = match Cli::from_env() {
        Ok(cli) => cli,
        Err(err) => return report(&err.into()),
    };

    init_logging(cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("ucli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let invocation = Invocation::from_args(cli.args)?;

    debug!("Operation: {}", invocation.operation);
    debug!("Resources: {:?}", invocation.resources);
    debug!("Flags: {:?}", invocation.flags);

    let Some(action) = Action::from_verb(&invocation.operation) else {
        output::usage(&format!("Unknown operation: {}", invocation.operation));
        return Ok(());
    };

    let client = ApiClient::new(&config)?;
    let response = client
        .dispatch(action, &invocation.resources, &invocation.flags)
        .await?;

    output::print_response(&response)?;
    Ok(())
}

/// Print an error the way its kind asks for and pick the exit code
fn report(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<UcliError>() {
        Some(usage) if usage.is_usage() => output::usage(&usage.to_string()),
        _ => output::error(&err.to_string()),
    }
    ExitCode::FAILURE
}
