use anyhow::Result;
use ecdcloader::{fetch, transform, write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) fetch ────────────────────────────────────────────────────
    info!("loading ECDC timeseries data from {}", fetch::DATASET_URL);
    let client = fetch::http_client()?;
    let raw = fetch::fetch_dataset(&client).await?;
    info!("loaded {} records; now transforming data", raw.len());

    // ─── 3) transform ────────────────────────────────────────────────
    let canonical = transform::transform(raw)?;

    // ─── 4) write ────────────────────────────────────────────────────
    let path = Path::new(write::DATA_DIR).join(write::OUTPUT_FILE);
    info!("saving to {}", path.display());
    write::write_table(&canonical, &path)?;

    info!("run complete");
    Ok(())
}
