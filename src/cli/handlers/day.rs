//! Handlers that read or change a single day's note.

use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::Path;
use std::process::Command;

use super::{AppContext, save_document};
use crate::cli::{AttachArgs, EditArgs, RmArgs, ShowArgs, StyleArgs, WriteArgs};
use crate::domain::style::toggle;
use crate::domain::{DayKey, Image, RichDocument, Run};
use crate::store::{NoteRepository, NoteStore};

pub fn handle_show(args: &ShowArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store()?;
    let day = ctx.day(&args.date)?;

    let Some(note) = store.get(day)? else {
        println!("No note for {}", day);
        return Ok(());
    };
    let document = note
        .document()
        .with_context(|| format!("note for {} is unreadable", day))?;

    println!("{}", render_text(&document));
    Ok(())
}

pub fn handle_write(args: &WriteArgs, ctx: &AppContext) -> Result<()> {
    let mut store = ctx.open_store()?;
    let day = ctx.day(&args.date)?;

    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read note text from stdin")?;
            strip_final_newline(buf)
        }
    };

    let document = RichDocument::from_plain_text(&text);
    let blank = document.is_blank();
    let changed = save_document(&mut store, day, ctx.idle, |_| document)?;
    report_save(day, changed, blank);
    Ok(())
}

pub fn handle_rm(args: &RmArgs, ctx: &AppContext) -> Result<()> {
    let mut store = ctx.open_store()?;
    let day = ctx.day(&args.date)?;

    if store.delete(day)? {
        println!("Deleted note for {}", day);
    } else {
        println!("No note for {}", day);
    }
    Ok(())
}

pub fn handle_style(args: &StyleArgs, ctx: &AppContext) -> Result<()> {
    let mut store = ctx.open_store()?;
    let day = ctx.day(&args.date)?;

    let changed = save_document(&mut store, day, ctx.idle, |doc| toggle(doc, args.style))?;
    if changed {
        println!("Toggled {} on {}", args.style, day);
    } else {
        println!("Nothing to style on {}", day);
    }
    Ok(())
}

pub fn handle_attach(args: &AttachArgs, ctx: &AppContext) -> Result<()> {
    let data = std::fs::read(&args.file)
        .with_context(|| format!("failed to read image: {}", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let mime = args
        .file
        .extension()
        .map(|ext| Image::mime_for_extension(&ext.to_string_lossy()))
        .unwrap_or("application/octet-stream");
    let image = Image::new(name.clone(), mime, data);

    let mut store = ctx.open_store()?;
    let day = ctx.day(&args.date)?;
    save_document(&mut store, day, ctx.idle, |doc| {
        let mut updated = doc.clone();
        updated.push_image(image);
        updated
    })?;

    println!("Attached {} to {}", name, day);
    Ok(())
}

// ===========================================
// Editor round trip
// ===========================================

/// Trait for launching an editor (allows mocking in tests).
pub(crate) trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Opens a file with the configured editor command.
struct ExternalEditor<'a>(&'a str);

impl EditorLauncher for ExternalEditor<'_> {
    fn open(&self, path: &Path) -> Result<()> {
        // Editor command may include args like "code --wait"
        let parts: Vec<&str> = self.0.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            bail!("editor command is empty");
        };

        let status = Command::new(cmd)
            .args(args)
            .arg(path)
            .status()
            .with_context(|| format!("failed to launch editor '{}'", self.0))?;

        if !status.success() {
            bail!("editor '{}' exited with non-zero status", self.0);
        }
        Ok(())
    }
}

/// Round-trips a day's text through `editor` and saves the result.
///
/// Formatting survives only if the text comes back unchanged. Notes with
/// images are refused, since plain text cannot carry them back.
pub(crate) fn edit_day<R: NoteRepository, E: EditorLauncher>(
    store: &mut NoteStore<R>,
    ctx: &AppContext,
    day: DayKey,
    editor: &E,
) -> Result<bool> {
    let original = match store.get(day)? {
        Some(note) => {
            let document = note
                .document()
                .with_context(|| format!("note for {} is unreadable", day))?;
            if document.has_images() {
                bail!(
                    "note for {} contains images, which a text editor would drop; use `write` to replace it",
                    day
                );
            }
            document.plain_text()
        }
        None => String::new(),
    };

    let file = tempfile::Builder::new()
        .prefix("daybook-")
        .suffix(".txt")
        .tempfile()
        .context("failed to create temporary file")?;
    std::fs::write(file.path(), &original)
        .with_context(|| format!("failed to write {}", file.path().display()))?;

    editor.open(file.path())?;

    let edited = std::fs::read_to_string(file.path())
        .with_context(|| format!("failed to read {}", file.path().display()))?;
    let edited = strip_final_newline(edited);
    if edited == original {
        return Ok(false);
    }

    save_document(store, day, ctx.idle, |_| {
        RichDocument::from_plain_text(&edited)
    })
}

pub fn handle_edit(args: &EditArgs, ctx: &AppContext) -> Result<()> {
    let mut store = ctx.open_store()?;
    let day = ctx.day(&args.date)?;

    let changed = edit_day(&mut store, ctx, day, &ExternalEditor(&ctx.editor))?;
    let blank = store.get(day)?.is_none();
    report_save(day, changed, blank);
    Ok(())
}

// ===========================================
// Helpers
// ===========================================

/// Plain text with each image shown as `[image: name]`.
pub(crate) fn render_text(document: &RichDocument) -> String {
    let mut out = String::new();
    for run in document.runs() {
        match run {
            Run::Text { text, .. } => out.push_str(text),
            Run::Image(image) => {
                out.push_str("[image: ");
                out.push_str(&image.name);
                out.push(']');
            }
        }
    }
    out
}

fn strip_final_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}

fn report_save(day: DayKey, changed: bool, blank: bool) {
    match (changed, blank) {
        (false, _) => println!("No changes for {}", day),
        (true, true) => println!("Deleted note for {}", day),
        (true, false) => println!("Saved note for {}", day),
    }
}
