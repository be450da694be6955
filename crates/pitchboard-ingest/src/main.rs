// Workbook loader entry point.
//
// 1. Load config and initialize tracing
// 2. Open the stat store, warn if the collection is not there yet
// 3. Read the workbook (path argument or `ingest.workbook`)
// 4. Normalize and bulk-write

use std::path::PathBuf;

use anyhow::Context;
use pitchboard_core::config;
use pitchboard_core::db::Database;
use pitchboard_core::logging::init_tracing;
use pitchboard_core::StatStore;
use pitchboard_ingest::{normalize_workbook, Workbook};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let config = config::load_config().context("failed to load configuration")?;
    init_tracing("pitchboard-load", &config.logging.filter)?;
    info!("Workbook loader starting up");

    let collection = &config.database.collection;
    let db = Database::open(&config.database.path).context("failed to open database")?;
    if !db.collection_exists(collection)? {
        warn!("collection '{collection}' does not exist yet; it will be created on write");
    }

    let workbook_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.ingest.workbook));
    let workbook = Workbook::open(&workbook_path)
        .with_context(|| format!("failed to read workbook {}", workbook_path.display()))?;

    let report = normalize_workbook(&workbook, collection);
    for sheet in &report.skipped_sheets {
        println!("skipped sheet '{sheet}': name is not a season year");
    }

    if report.actions.is_empty() {
        info!("nothing to load");
        println!("nothing to load");
        return Ok(());
    }

    info!("bulk writing {} documents", report.actions.len());
    let written = db
        .bulk_write(&report.actions)
        .context("bulk write failed")?;

    if let Some(run) = db.latest_load_run()? {
        info!("recorded load run {}", run.run_id);
    }
    println!(
        "loaded {written} documents into '{collection}' ({} rows skipped)",
        report.skipped_rows
    );
    Ok(())
}
