mod args;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use smtp_probe::server::{self, AppState};
use smtp_probe::{Prober, Target, check_target, mx};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::{Cli, Commands};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=info,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();
    let options = cli.probe.options();

    match cli.cmd {
        Commands::Check {
            email,
            domain,
            format,
        } => {
            let target = Target::from_params(email.as_deref(), domain.as_deref())?;
            let result = check_target(&target, &options).await;
            println!("{}", output::render(format, &result)?);
            // codes de sortie : 0 joignable, 2 échec de vérification, 1 fatal
            Ok(if result.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
        Commands::Serve { listen } => {
            let resolver = mx::build_resolver(options.dns).context("build DNS resolver")?;
            let state = AppState {
                resolver,
                prober: Prober::new(options.backend),
                options,
            };
            server::serve(listen, state).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
