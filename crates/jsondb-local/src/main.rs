mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use jsondb_core::ConsoleLogger;
use jsondb_local::StoreOptions;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{Command, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string())),
        )
        .init();

    let dir = config.effective_dir();
    debug!("jsondb {} using {}", jsondb_core::VERSION, dir.display());

    let logger = Arc::new(ConsoleLogger::new(config.log_level.filter()));
    let store = jsondb_local::open(&dir, StoreOptions::default().with_logger(logger))
        .await
        .with_context(|| format!("Failed to open database at {}", dir.display()))?;

    match config.command {
        Command::Write {
            collection,
            resource,
            json,
        } => {
            let value: serde_json::Value =
                serde_json::from_str(&json).context("Record is not valid JSON")?;
            store.write(&collection, &resource, &value).await?;
            info!("Wrote {}/{}", collection, resource);
        }
        Command::Read {
            collection,
            resource,
        } => {
            let value: serde_json::Value = store.read(&collection, &resource).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::List { collection } => {
            let records = store.read_all(&collection).await?;
            for record in &records {
                // Stored records already end with a newline
                print!("{}", record);
            }
            info!("{} records in {}", records.len(), collection);
        }
        Command::Delete {
            collection,
            resource,
        } => {
            store.delete(&collection, &resource).await?;
            info!("Deleted {}/{}", collection, resource);
        }
    }

    Ok(())
}
