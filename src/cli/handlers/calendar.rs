//! Calendar command handler.

use anyhow::{Result, anyhow};
use std::collections::HashSet;
use std::fmt::Write as _;

use super::AppContext;
use crate::cli::CalArgs;
use crate::cli::output::{MonthListing, Output, OutputFormat};
use crate::domain::{Month, MonthGrid, WEEKDAY_LABELS};

pub fn handle_cal(args: &CalArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store()?;
    let selected = ctx.day(&args.date)?;
    let month = match &args.month {
        Some(m) => m.parse::<Month>().map_err(|e| anyhow!(e))?,
        None => Month::containing(selected),
    };

    let days: HashSet<_> = store.days()?.into_iter().collect();
    let grid = MonthGrid::build(month, ctx.calendar.today(), selected, |day| {
        days.contains(&day)
    });

    match args.format {
        OutputFormat::Human => print!("{}", render_month(&grid)),
        OutputFormat::Json => {
            let output = Output::new(MonthListing::from(&grid));
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Text calendar. Days with notes carry `*`, the selected day `>`.
pub(crate) fn render_month(grid: &MonthGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^35}", grid.month().title());

    let header: String = WEEKDAY_LABELS.iter().map(|l| format!("{:^5}", l)).collect();
    let _ = writeln!(out, "{}", header.trim_end());

    let mut today = None;
    for week in grid.weeks() {
        let mut line = String::new();
        for cell in week {
            if cell.is_today {
                today = Some(cell.day);
            }
            if !cell.in_month {
                line.push_str("     ");
                continue;
            }
            let selected = if cell.is_selected { '>' } else { ' ' };
            let note = if cell.has_note { '*' } else { ' ' };
            let _ = write!(line, "{}{:>2}{} ", selected, cell.day.day(), note);
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }

    if let Some(today) = today {
        let _ = writeln!(out, "Today: {}", today);
    }
    out
}
