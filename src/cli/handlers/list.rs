//! List and search command handlers.

use anyhow::{Context, Result};

use super::{AppContext, single_line};
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::cli::{ListArgs, SearchArgs};
use crate::search::search;
use crate::store::{NoteRepository, NoteStore};

/// Listings for every readable note, in ascending day order.
pub(crate) fn list_notes<R: NoteRepository>(store: &NoteStore<R>) -> Result<Vec<NoteListing>> {
    let mut notes = store.all()?;
    notes.sort_by_key(|n| n.day());

    let mut listings = Vec::with_capacity(notes.len());
    for note in &notes {
        match note.document() {
            Ok(document) => listings.push(NoteListing::new(note, &document.plain_text())),
            Err(err) => {
                tracing::warn!(day = %note.day(), error = %err, "skipping unreadable note")
            }
        }
    }
    Ok(listings)
}

pub fn handle_list(args: &ListArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store()?;
    let listings = list_notes(&store)?;
    print_listings(&listings, args.format, "No notes yet.")
}

pub fn handle_search(args: &SearchArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store()?;
    let hits = search(&store, &args.query)
        .with_context(|| format!("search failed for query: {}", args.query))?;

    let listings: Vec<NoteListing> = hits.iter().map(NoteListing::from).collect();
    print_listings(&listings, args.format, "No matching notes found.")
}

fn print_listings(listings: &[NoteListing], format: OutputFormat, empty: &str) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if listings.is_empty() {
                println!("{}", empty);
            }
            for listing in listings {
                println!("{}  {}", listing.day, single_line(&listing.preview));
            }
        }
        OutputFormat::Json => {
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
