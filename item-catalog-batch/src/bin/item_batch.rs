use clap::Parser;
use item_catalog_api::ItemRequest;
use item_catalog_batch::batch::apply_policy;
use item_catalog_batch::telemetry::init_logging;
use item_catalog_batch::{
    AppConfig, BatchCoordinator, BatchSettings, CatalogService, CliArgs, ItemService, WorkerPool,
};
use item_catalog_postgres::{init_database, ItemRepositoryImpl};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = AppConfig::try_from(args)?;

    init_logging(config.log_json)?;

    tracing::info!(
        num_workers = config.batch.num_workers,
        failure_policy = ?config.batch.failure_policy,
        "Starting item batch"
    );

    let db_pool = PgPoolOptions::new()
        .max_connections(config.max_db_connections)
        .connect(&config.database_url)
        .await?;
    init_database(&db_pool).await?;

    let store = Arc::new(ItemRepositoryImpl::new(Arc::new(db_pool)));
    let pool = Arc::new(WorkerPool::from_config(&config.batch));
    let settings = BatchSettings::from(&config.batch);
    let coordinator = BatchCoordinator::new(store.clone(), pool.clone(), settings);

    if config.seed > 0 {
        seed(&CatalogService::new(store, coordinator.clone()), config.seed).await?;
    }

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if signal::ctrl_c().await.is_ok() {
                tracing::info!("Received Ctrl+C signal, cancelling batch");
                cancel.cancel();
            }
        }
    });

    let report = coordinator.run_batch(&cancel).await;
    pool.shutdown().await?;
    let report = report?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    match apply_policy(settings.failure_policy, report) {
        Ok(items) => {
            tracing::info!(processed = items.len(), "Item batch finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, failed_ids = ?e.failed_ids(), "Item batch failed");
            anyhow::bail!(e)
        }
    }
}

async fn seed(service: &impl ItemService, count: usize) -> anyhow::Result<()> {
    for i in 1..=count {
        let request = ItemRequest::new(
            &format!("name{i}"),
            &format!("description{i}"),
            &format!("ex{i}@gmail.com"),
        );
        service.create(request).await?;
    }

    tracing::info!(count, "Seeded demo items");
    Ok(())
}
