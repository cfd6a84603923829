use anyhow::Context;
use clap::Parser;
use rock_ai::analyzer::GeminiClient;
use rock_ai::app;
use rock_ai::cli::Cli;
use rock_ai::config::Config;
use rock_ai::progress::Spinner;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,rock_ai=debug,rock_ai_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when at least one run or save failed
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config = Config::load().context("failed to load configuration")?;
    debug!("configuration:\n{}", config);

    let stdout = std::io::stdout();
    let all_ok = app::run(
        cli,
        &config,
        |settings| Ok(Spinner::new(GeminiClient::new(settings)?)),
        &mut stdout.lock(),
    )?;
    Ok(all_ok)
}
