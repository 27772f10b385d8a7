//! daybook - one rich-text note per calendar day

pub mod cli;
pub mod domain;
pub mod editor;
pub mod infra;
pub mod search;
pub mod store;
pub mod transfer;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        AppContext, handle_attach, handle_cal, handle_completions, handle_edit, handle_export,
        handle_import, handle_list, handle_rm, handle_search, handle_show, handle_style,
        handle_write,
    },
    logging,
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = Config::load()?;
    let ctx = AppContext::new(&config, cli.store.as_ref())?;
    tracing::debug!(store = %ctx.store_path.display(), "resolved settings");

    match &cli.command {
        Command::Show(args) => handle_show(args, &ctx),
        Command::Write(args) => handle_write(args, &ctx),
        Command::Edit(args) => handle_edit(args, &ctx),
        Command::Rm(args) => handle_rm(args, &ctx),
        Command::List(args) => handle_list(args, &ctx),
        Command::Search(args) => handle_search(args, &ctx),
        Command::Cal(args) => handle_cal(args, &ctx),
        Command::Style(args) => handle_style(args, &ctx),
        Command::Attach(args) => handle_attach(args, &ctx),
        Command::Export(args) => handle_export(args, &ctx),
        Command::Import(args) => handle_import(args, &ctx),
        Command::Completions(args) => handle_completions(args),
    }
}
