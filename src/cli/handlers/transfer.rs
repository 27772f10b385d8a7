//! Export and import command handlers.

use anyhow::{Context, Result};
use chrono::Utc;

use super::AppContext;
use crate::cli::{ExportArgs, ImportArgs};
use crate::transfer::{export_to_path, import_from_path};

pub fn handle_export(args: &ExportArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store()?;
    let count = store.days()?.len();

    let path = export_to_path(&store, &args.path, Utc::now())
        .with_context(|| format!("failed to export notes to {}", args.path.display()))?;

    println!("Exported {} notes to {}", count, path.display());
    Ok(())
}

pub fn handle_import(args: &ImportArgs, ctx: &AppContext) -> Result<()> {
    let mut store = ctx.open_store()?;

    let summary = import_from_path(&mut store, &args.path)
        .with_context(|| format!("failed to import {}", args.path.display()))?;

    println!(
        "Imported {} notes ({} new, {} updated, {} removed, {} unchanged)",
        summary.changed() + summary.unchanged,
        summary.inserted,
        summary.replaced,
        summary.deleted,
        summary.unchanged
    );
    Ok(())
}
