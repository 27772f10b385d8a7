//! CLI command definitions and handlers

pub mod config;
pub mod date_arg;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::style::Trait;
use output::OutputFormat;

/// daybook - one rich-text note per calendar day
#[derive(Parser, Debug)]
#[command(name = "daybook", version, about, long_about = None)]
pub struct Cli {
    /// Note database (overrides config file)
    #[arg(short = 's', long, global = true)]
    pub store: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a day's note
    Show(ShowArgs),

    /// Replace a day's text (reads stdin when TEXT is omitted)
    Write(WriteArgs),

    /// Edit a day's text in your editor
    Edit(EditArgs),

    /// Delete a day's note
    Rm(RmArgs),

    /// List notes in day order
    #[command(name = "ls")]
    List(ListArgs),

    /// Case-insensitive search across all notes
    Search(SearchArgs),

    /// Show a month calendar with note markers
    Cal(CalArgs),

    /// Toggle bold, italic or underline over a day's note
    Style(StyleArgs),

    /// Append an image to a day's note
    Attach(AttachArgs),

    /// Write all notes to a JSON backup file
    Export(ExportArgs),

    /// Merge notes from a JSON backup file
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Day (YYYY-MM-DD, today, yesterday, tomorrow, or [+-]Nd)
    #[arg(short = 'D', long, default_value = "today")]
    pub date: String,
}

/// Arguments for the `write` command
#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// Day (YYYY-MM-DD, today, yesterday, tomorrow, or [+-]Nd)
    #[arg(short = 'D', long, default_value = "today")]
    pub date: String,

    /// New text; empty text deletes the note
    pub text: Option<String>,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Day (YYYY-MM-DD, today, yesterday, tomorrow, or [+-]Nd)
    #[arg(short = 'D', long, default_value = "today")]
    pub date: String,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Day (YYYY-MM-DD, today, yesterday, tomorrow, or [+-]Nd)
    #[arg(short = 'D', long, default_value = "today")]
    pub date: String,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `cal` command
#[derive(Parser, Debug)]
pub struct CalArgs {
    /// Month to show (YYYY-MM); defaults to the selected day's month
    #[arg(short, long)]
    pub month: Option<String>,

    /// Selected day (YYYY-MM-DD, today, yesterday, tomorrow, or [+-]Nd)
    #[arg(short = 'D', long, default_value = "today")]
    pub date: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `style` command
#[derive(Parser, Debug)]
pub struct StyleArgs {
    /// Style to toggle (bold, italic, underline)
    pub style: Trait,

    /// Day (YYYY-MM-DD, today, yesterday, tomorrow, or [+-]Nd)
    #[arg(short = 'D', long, default_value = "today")]
    pub date: String,
}

/// Arguments for the `attach` command
#[derive(Parser, Debug)]
pub struct AttachArgs {
    /// Image file to embed
    pub file: PathBuf,

    /// Day (YYYY-MM-DD, today, yesterday, tomorrow, or [+-]Nd)
    #[arg(short = 'D', long, default_value = "today")]
    pub date: String,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output file or directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// Arguments for the `import` command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Backup file to merge
    pub path: PathBuf,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
