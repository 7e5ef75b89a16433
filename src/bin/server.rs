use std::sync::Arc;

use anyhow::Context;
use trivia_api::configuration::get_configuration;
use trivia_api::db::Store;
use trivia_api::server::app::{run_server, AppState};
use trivia_api::telemetry::init_tracing;
use trivia_api::trivia::quiz::{RandomSource, SeededRandom, ThreadRandom};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let settings = get_configuration().context("Cannot read configuration")?;
    let store = Store::connect(&settings.database)
        .await
        .context("Cannot connect to DB")?;

    tracing::info!("Running db migrations...");
    store.migrate().await.context("Cannot run migrations")?;

    let random: Arc<dyn RandomSource> = match settings.quiz_seed {
        Some(seed) => {
            tracing::info!(seed, "Quiz selection is seeded");
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(ThreadRandom),
    };
    let state = AppState::new(store.clone(), random, settings.page_size);
    let result = run_server(&settings.application, state).await;
    store.close().await;
    result
}
