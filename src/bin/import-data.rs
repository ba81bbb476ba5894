use anyhow::Context;
use clap::Parser;
use lucky::config::Config;
use lucky::infrastructure::observability;
use lucky::infrastructure::persistence::{import::read_fortune_records, Database};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "import-data")]
#[command(about = "Replace the fortune database with the contents of a CSV file")]
struct Cli {
    /// CSV file with `author,fortune,tags` columns; tags are `/`-separated
    path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    observability::init_cli_tracing();

    let file = File::open(&cli.path).with_context(|| format!("opening {}", cli.path.display()))?;
    let records = read_fortune_records(file)
        .with_context(|| format!("reading {}", cli.path.display()))?;
    tracing::info!("Read {} rows from {}", records.len(), cli.path.display());

    let db = Database::connect(&config.database_url, config.db_max_connections).await?;
    db.reset_schema().await.context("recreating schema")?;

    let summary = db.import_fortunes(records).await?;
    println!(
        "Imported {} fortunes by {} authors with {} tags",
        summary.fortunes, summary.authors, summary.tags
    );

    Ok(())
}
