use anyhow::Result;
use clap::Parser;
use gmail_cleaner::auth::{self, InstalledFlowAuthorizer};
use gmail_cleaner::cli::{self, Cli};
use gmail_cleaner::client::ProductionGmailClient;
use gmail_cleaner::config::Config;
use gmail_cleaner::credentials::CredentialStore;
use gmail_cleaner::deleter::DeleteExecutor;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Exit with proper code on error
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        eprintln!("\nFor help, run: gmail-cleaner --help");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    auth::install_crypto_provider()?;

    let cli = Cli::parse();

    // Initialize tracing with level based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gmail_cleaner=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gmail_cleaner=info,warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let config = Config::load(&cli.config).await?;

    tracing::info!("Authenticating with Gmail API...");
    let store = CredentialStore::new(
        &config.auth.token_cache,
        InstalledFlowAuthorizer::new(&cli.credentials),
    );
    let token = store.obtain().await?;

    let hub = auth::initialize_gmail_hub(&token).await?;
    let client = ProductionGmailClient::with_config(hub, &config.cleanup);
    let executor = DeleteExecutor::new(config.cleanup.batch_size);

    cli::run_cleanup(&client, &executor, cli.dry_run).await;

    Ok(())
}
