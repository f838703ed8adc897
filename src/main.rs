use clap::Parser;
use std::process::ExitCode;

use interclip_lib::bootstrap::init_tracing_subscriber;
use interclip_lib::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // .env must be loaded before clap reads its env fallbacks
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {e}");
    }

    match interclip_lib::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Interclip failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
