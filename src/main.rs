use clap::Parser;

use kindle_clippings::bootstrap::{self, Secrets};
use kindle_clippings::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the real environment still applies.
    dotenvy::dotenv().ok();
    bootstrap::tracing::init_tracing_subscriber()?;

    let cli = Cli::parse();
    let config = bootstrap::load_config(&cli.config)?;
    let deps = bootstrap::wire_dependencies(&config, &Secrets::from_env(), !cli.no_definitions)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    bootstrap::run_command(&cli.command, &deps, &mut out).await
}
