// src/main.rs

use orderin_transformer::{
    aggregator::Aggregator,
    config::Config,
    db::{to_documents, DB},
    error::TransformError,
    services::SystemCollaborators,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), TransformError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let db = DB::new(&config).await?;

    let rows = db.fetch_rows(&config.source_collection).await?;

    let mut aggregator = Aggregator::new(SystemCollaborators);
    aggregator.process_all(&rows);
    let shipments = aggregator.finish();

    let documents = to_documents(&shipments)?;
    db.add_documents(&config.target_collection, documents, config.replace_target)
        .await?;

    Ok(())
}
