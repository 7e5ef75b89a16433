use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use trivia_api::configuration::get_configuration;
use trivia_api::db::transfer::{export_data, import_data};
use trivia_api::db::Store;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database URL, overrides the configured one
    #[clap(long)]
    database_url: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories.csv and questions.csv into a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let mut settings = get_configuration().context("Cannot read configuration")?;
    if let Some(url) = cli.database_url {
        settings.database.url = SecretString::from(url);
    }
    let store = Store::connect(&settings.database)
        .await
        .context("Cannot connect to DB")?;
    store.migrate().await.context("Cannot run migrations")?;

    let result = match cli.command {
        Commands::Export { path } => export_data(&store, &path).await.context("Cannot export"),
        Commands::Import { path } => import_data(&store, &path).await.context("Cannot import"),
    };
    store.close().await;
    result
}
