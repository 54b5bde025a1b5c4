use std::process::ExitCode;

use clap::Parser;
use glassworks_cli::{run, Args, GeneratorConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Load .env file if present (ignore errors if missing).
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = match GeneratorConfig::from_env().and_then(|c| c.with_args(&args)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    // Logs go to stderr so printed JSON on stdout stays machine-readable.
    let json = config.log_json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glassworks_cli=info,glassworks_codegen=info".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let mut stdout = std::io::stdout().lock();
    match run(&args, &config, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "generate-shapes failed");
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
