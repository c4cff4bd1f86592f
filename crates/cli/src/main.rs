//! `kiputech`: import CSV files into a fresh inventory and print it.
//!
//! Usage: `kiputech <file.csv>...`
//!
//! Environment:
//! - `KIPUTECH_CODE_PREFIX`, `KIPUTECH_CODE_WIDTH`, `KIPUTECH_IMPORT_DELIMITER`
//! - `KIPUTECH_SORT` (`stock-asc`, `stock-desc`, `price-asc`, `price-desc`)
//! - `KIPUTECH_OUTPUT` (`table` or `json`)
//! - `KIPUTECH_LOG_FORMAT` (`json` or `text`), `RUST_LOG`

use std::io::Write;
use std::str::FromStr;

use anyhow::Context;

use kiputech_core::DomainError;
use kiputech_inventory::{Inventory, InventoryConfig, SortOrder};
use kiputech_observability::LogFormat;
use kiputech_products::{Product, ProductRow};

fn main() -> anyhow::Result<()> {
    kiputech_observability::init(env_or("KIPUTECH_LOG_FORMAT", LogFormat::default()));

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        anyhow::bail!("usage: kiputech <file.csv>...");
    }

    let mut inventory = Inventory::with_config(config_from_env());
    for path in &paths {
        match inventory.import_from(path) {
            Ok(summary) => tracing::info!(
                path = %path,
                added = summary.added,
                duplicates = summary.duplicates,
                "imported"
            ),
            // A bad path should not stop the remaining imports.
            Err(err @ DomainError::FileNotFound(_)) => tracing::warn!(error = %err, "skipped"),
            Err(err) => return Err(err).with_context(|| format!("importing {path}")),
        }
    }

    let sort: Option<SortOrder> = std::env::var("KIPUTECH_SORT")
        .ok()
        .and_then(|raw| parse_or_warn("KIPUTECH_SORT", &raw));
    let rows: Vec<&Product> = match sort {
        Some(order) => inventory.sort_snapshot(order),
        None => inventory.products().iter().collect(),
    };

    let json = std::env::var("KIPUTECH_OUTPUT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &rows).context("writing JSON output")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", ProductRow::header())?;
        writeln!(out, "{}", "-".repeat(65))?;
        for product in &rows {
            writeln!(out, "{}", product.row())?;
        }
        writeln!(out, "\nTotal products: {}", rows.len())?;
    }
    Ok(())
}

fn config_from_env() -> InventoryConfig {
    let defaults = InventoryConfig::default();
    InventoryConfig {
        code_prefix: std::env::var("KIPUTECH_CODE_PREFIX").unwrap_or(defaults.code_prefix),
        code_width: env_or("KIPUTECH_CODE_WIDTH", defaults.code_width),
        import_delimiter: env_or("KIPUTECH_IMPORT_DELIMITER", defaults.import_delimiter),
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T
where
    T::Err: core::fmt::Display,
{
    std::env::var(key)
        .ok()
        .and_then(|raw| parse_or_warn(key, &raw))
        .unwrap_or(default)
}

fn parse_or_warn<T: FromStr>(key: &str, raw: &str) -> Option<T>
where
    T::Err: core::fmt::Display,
{
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, value = raw, error = %err, "ignoring malformed setting");
            None
        }
    }
}
