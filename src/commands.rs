//! One-shot subcommands
//!
//! Each `run_*` writes human or JSON output to the given sink and returns
//! whether the command succeeded. `false` maps to exit status 1.

use crate::config::{self, StockroomConfig};
use crate::shell::CONFIRM_TOKEN;
use crate::storage::RecordStore;
use crate::{ui, DeleteOutcome, RecordPatch, UpdateOutcome};
use anyhow::Context;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

/// Open the database and make sure the records table exists.
pub fn open_store(database: &Path) -> anyhow::Result<RecordStore> {
    config::ensure_parent_dir(database)
        .with_context(|| format!("could not create directory for {}", database.display()))?;
    let store = RecordStore::open(database)
        .with_context(|| format!("could not open database {}", database.display()))?;
    store
        .ensure_schema()
        .with_context(|| format!("could not prepare the records table in {}", database.display()))?;
    Ok(store)
}

pub fn run_add(
    store: &RecordStore,
    output_mode: OutputMode,
    out: &mut impl Write,
    name: &str,
    price: f64,
    qty: i64,
) -> anyhow::Result<bool> {
    let id = store.create(name, price, qty)?;
    if output_mode.is_human() {
        ui::success(out, &format!("Product added with id={}", id))?;
    } else {
        emit(out, "add", true, serde_json::json!({ "id": id }))?;
    }
    Ok(true)
}

pub fn run_get(
    store: &RecordStore,
    output_mode: OutputMode,
    out: &mut impl Write,
    id: i64,
) -> anyhow::Result<bool> {
    let record = store.fetch_one(id)?;
    let found = record.is_some();
    if output_mode.is_human() {
        match record {
            Some(record) => writeln!(out, "{}", ui::records_table(&[record]))?,
            None => ui::warn(out, "Product not found")?,
        }
    } else {
        emit(out, "get", found, serde_json::to_value(&record)?)?;
    }
    Ok(found)
}

pub fn run_list(
    store: &RecordStore,
    output_mode: OutputMode,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let records = store.fetch_all()?;
    if output_mode.is_human() {
        if records.is_empty() {
            ui::warn(out, "No products found")?;
        } else {
            writeln!(out, "{}", ui::records_table(&records))?;
        }
    } else {
        emit(out, "list", true, serde_json::to_value(&records)?)?;
    }
    Ok(true)
}

pub fn run_update(
    store: &RecordStore,
    output_mode: OutputMode,
    out: &mut impl Write,
    id: i64,
    patch: &RecordPatch,
) -> anyhow::Result<bool> {
    let (ok, label, message) = match store.update(id, patch)? {
        UpdateOutcome::Updated => (true, "updated", format!("Product id={} updated", id)),
        UpdateOutcome::NotFound => (false, "not_found", format!("No product with id={} found", id)),
        UpdateOutcome::NoFieldsGiven => (false, "no_fields", "No fields to update".to_string()),
    };
    report(out, output_mode, "update", ok, id, label, &message)?;
    Ok(ok)
}

/// Delete only when `confirm` is exactly the confirmation token.
pub fn run_delete(
    store: &RecordStore,
    output_mode: OutputMode,
    out: &mut impl Write,
    id: i64,
    confirm: &str,
) -> anyhow::Result<bool> {
    if confirm.trim() != CONFIRM_TOKEN {
        tracing::debug!(id, "delete not confirmed");
        report(out, output_mode, "delete", false, id, "cancelled", "Delete cancelled")?;
        return Ok(false);
    }

    let (ok, label, message) = match store.delete(id)? {
        DeleteOutcome::Deleted => (true, "deleted", format!("Product id={} deleted", id)),
        DeleteOutcome::NotFound => (false, "not_found", format!("No product with id={} found", id)),
    };
    report(out, output_mode, "delete", ok, id, label, &message)?;
    Ok(ok)
}

/// Write the config file, then create the database and its table.
pub fn run_init(
    output_mode: OutputMode,
    out: &mut impl Write,
    config_path: &Path,
    current: &StockroomConfig,
    database: &Path,
    force: bool,
) -> anyhow::Result<bool> {
    let config = StockroomConfig {
        database: Some(database.display().to_string()),
        history: current.history.clone(),
    };
    config::write_config(config_path, &config, force)?;
    let store = open_store(database)?;
    let count = store.count()?;

    if output_mode.is_human() {
        ui::success(out, "Initialized")?;
        ui::info(out, "Config", &config_path.display().to_string())?;
        ui::info(out, "Database", &database.display().to_string())?;
        ui::info(out, "Products", &count.to_string())?;
    } else {
        let data = serde_json::json!({
            "config": config_path.display().to_string(),
            "database": database.display().to_string(),
            "products": count,
        });
        emit(out, "init", true, data)?;
    }
    Ok(true)
}

fn report(
    out: &mut impl Write,
    output_mode: OutputMode,
    command: &str,
    ok: bool,
    id: i64,
    outcome: &str,
    message: &str,
) -> anyhow::Result<()> {
    if output_mode.is_human() {
        if ok {
            ui::success(out, message)?;
        } else {
            ui::warn(out, message)?;
        }
        Ok(())
    } else {
        emit(out, command, ok, serde_json::json!({ "id": id, "outcome": outcome }))
    }
}

fn emit(out: &mut impl Write, command: &str, ok: bool, data: serde_json::Value) -> anyhow::Result<()> {
    let envelope = serde_json::json!({
        "ok": ok,
        "command": command,
        "data": data,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&envelope)?)?;
    Ok(())
}
