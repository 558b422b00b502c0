use clap::Parser;
use news_fetcher::config::Cli;
use news_fetcher::{server, utils, AppState, Fetcher, IngestionPipeline, NewsRepository, NewsStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,news_fetcher=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir();
    utils::prepare_data_dir(&data_dir).await?;

    let db_path = utils::database_path(&data_dir);
    info!("Database is stored at: {}", db_path.display());
    let store = Arc::new(NewsStore::connect(&db_path).await?);
    store.ensure_schema().await?;

    let rule = cli.parsing_rule();
    let pipeline = IngestionPipeline::new(Fetcher::new(cli.fetch_config())?, store.clone());

    // A failed ingestion is logged; search over what is already stored
    // still comes up.
    let outcome = if let Some(feed) = &cli.feed {
        Some(pipeline.run(feed, &rule).await)
    } else if let Some(path) = &cli.feed_file {
        info!("Reading feed from {} with the parsing rule: {}", path.display(), rule);
        match tokio::fs::read(path).await {
            Ok(body) => Some(pipeline.ingest_bytes(&body, &rule).await),
            Err(e) => Some(Err(e.into())),
        }
    } else {
        info!("No feed provided to fetch news from");
        None
    };

    match outcome {
        Some(Ok(stored)) => info!("Ingested {} news items", stored),
        Some(Err(e)) => error!(kind = e.kind(), "Ingestion failed: {}", e),
        None => {}
    }

    if cli.no_serve {
        store.close().await;
        return Ok(());
    }

    let index = utils::write_index_page(&data_dir).await?;
    info!("Search page written to {}", index.display());

    let router = server::create_router(AppState::new(store.clone()), Some(&data_dir));
    server::serve(cli.addr, router).await?;

    store.close().await;
    Ok(())
}
