// Cut-list engine entry point
use anyhow::{anyhow, Context, Result};
use cutlist_engine::config::CutlistSettings;
use cutlist_engine::data::{write_rows, CsvDialect};
use cutlist_engine::host::{is_metric, InMemoryModel, ModelHost};
use cutlist_engine::notation::DecimalNotation;
use cutlist_engine::version;
use std::io;
use tracing::{info, Level};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let model_path = args
        .next()
        .ok_or_else(|| anyhow!("usage: cutlist-engine <model.json> [settings.json]"))?;

    let settings = match args.next() {
        Some(path) => CutlistSettings::load(&path).with_context(|| format!("Failed to load settings '{}'", path))?,
        None => CutlistSettings::default(),
    };

    let level = if settings.diagnostics.component_discovery {
        Level::TRACE
    } else if settings.diagnostics.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).init();

    info!("Starting CutList {}", version());

    let mut model =
        InMemoryModel::load(&model_path).with_context(|| format!("Failed to load model '{}'", model_path))?;
    info!(
        "Model has {} definitions, metric units: {}",
        model.definitions().len(),
        is_metric(&model)
    );

    let mut notation = DecimalNotation::with_settings(&settings);
    let separator = notation.detect(&mut model);
    info!("Decimal notation is '{}'", separator);

    write_rows(io::stdout().lock(), model.parts(), CsvDialect::Generic, separator, &settings)?;
    Ok(())
}
