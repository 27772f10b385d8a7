//! Day argument parsing for CLI commands.

use crate::domain::DayKey;

/// Resolves a day argument relative to `today`.
///
/// Accepts:
/// - Absolute: "2024-01-15" (YYYY-MM-DD format)
/// - Named: "today", "yesterday", "tomorrow"
/// - Relative: "-3d" (three days ago), "+1d", "7d" (seven days ago)
pub fn parse_day(s: &str, today: DayKey) -> Result<DayKey, String> {
    let s = s.trim();

    match s.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => return shift(today, -1, s),
        "tomorrow" => return shift(today, 1, s),
        _ => {}
    }

    // Relative format: [+-]Nd; a bare "Nd" counts backwards
    if let Some(days_str) = s.strip_suffix('d') {
        let days: i64 = match days_str.strip_prefix('+') {
            Some(forward) => forward.parse(),
            None if days_str.starts_with('-') => days_str.parse(),
            None => days_str.parse().map(|d: i64| -d),
        }
        .map_err(|_| format!("invalid relative date: {}", s))?;
        return shift(today, days, s);
    }

    s.parse::<DayKey>().map_err(|_| {
        format!(
            "invalid date (expected YYYY-MM-DD, today, yesterday, tomorrow or [+-]Nd): {}",
            s
        )
    })
}

fn shift(today: DayKey, days: i64, input: &str) -> Result<DayKey, String> {
    today
        .offset_days(days)
        .ok_or_else(|| format!("date out of range: {}", input))
}
