// ABOUTME: CLI catalog command - print the items the wizard can select from

use super::OutputFormat;
use crate::catalog::{load_catalog, provider_for};
use crate::config::AppConfig;
use crate::models::{Catalog, CatalogKind};
use anyhow::{Context, Result};

/// Execute the catalog command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<()> {
    let provider = provider_for(&config.catalog).context("Failed to open catalog")?;
    let catalog = load_catalog(provider.as_ref()).context("Failed to load catalog")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
        OutputFormat::Text => print!("{}", render_text(&catalog)),
    }
    Ok(())
}

/// Plain-text listing, one section per catalog kind
pub fn render_text(catalog: &Catalog) -> String {
    let mut out = String::new();
    for &kind in CatalogKind::all() {
        out.push_str(kind.label());
        out.push('\n');

        let items = catalog.items(kind);
        if items.is_empty() {
            out.push_str("  (none)\n");
        }
        let width = items.iter().map(|item| item.id.len()).max().unwrap_or(0);
        for item in items {
            out.push_str(&format!("  {:<width$}  {}\n", item.id, item.name));
        }
        out.push('\n');
    }
    out
}
