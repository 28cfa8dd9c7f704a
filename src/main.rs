use anyhow::Context;
use serde::Deserialize;
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoice_engine::config::Config;
use invoice_engine::invoices::{DocumentKind, ExchangeRate, InvoiceEditor, LineItem, TaxMode};
use invoice_engine::items::{CatalogItem, InMemoryCatalog};

/// Document handed to the engine: rows plus the catalog to resolve them against
#[derive(Debug, Deserialize)]
struct DocumentRequest {
    #[serde(default)]
    kind: DocumentKind,
    #[serde(default)]
    is_inclusive_tax: bool,
    #[serde(default)]
    exchange_rate: ExchangeRate,
    #[serde(default)]
    lines: Vec<LineItem>,
    #[serde(default)]
    catalog: Vec<CatalogItem>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    // Initialize tracing; stdout is reserved for the computed document
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("invoice_engine={}", config.app.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Environment: {}", config.app.env);

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read document from stdin")?;
            buffer
        }
    };

    let request: DocumentRequest =
        serde_json::from_str(&raw).context("Document is not valid JSON")?;
    let catalog = InMemoryCatalog::new(request.catalog);

    tracing::info!(
        rows = request.lines.len(),
        catalog_items = catalog.len(),
        exchange_rate = %request.exchange_rate,
        "Computing document"
    );

    let mut editor = InvoiceEditor::load(
        request.kind,
        TaxMode::from_inclusive(request.is_inclusive_tax),
        request.exchange_rate,
        request.lines,
        config.precision.policy(),
    );

    // Rows flagged as loading still need their catalog data
    let pending: Vec<_> = editor
        .lines()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.is_loading)
        .filter_map(|(index, row)| row.item.clone().map(|item| (index, item)))
        .collect();

    let mut snapshot = editor.snapshot();
    for (index, item) in pending {
        snapshot = editor.select_item(index, Some(item), &catalog).await;
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
