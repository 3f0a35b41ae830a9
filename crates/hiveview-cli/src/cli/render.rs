//! Text rendering helpers. Styling goes through the [`ThemeContext`] the
//! command was given.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;

use hiveview_core::{HealthTier, TestRun, Theme, ThemeContext, Trend};

use super::args::ColorChoice;

pub fn theme_for(choice: ColorChoice) -> Theme {
    match choice {
        ColorChoice::Always => Theme::Color,
        ColorChoice::Never => Theme::Plain,
        ColorChoice::Auto => {
            if std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
                Theme::Plain
            } else {
                Theme::Color
            }
        }
    }
}

pub fn tier_label(theme: &ThemeContext, tier: HealthTier) -> String {
    let label = format!("{:<7}", tier.as_str());
    if !theme.is_color() {
        return label;
    }
    match tier {
        HealthTier::AllPass => label.green().to_string(),
        HealthTier::PartialFail => label.yellow().to_string(),
        HealthTier::MostlyFail => label.red().to_string(),
    }
}

pub fn trend_mark(theme: &ThemeContext, trend: Trend) -> String {
    let arrow = trend.arrow();
    if !theme.is_color() {
        return arrow.to_string();
    }
    match trend {
        Trend::Up => arrow.green().to_string(),
        Trend::Down => arrow.red().to_string(),
        Trend::Flat => arrow.to_string(),
    }
}

/// Heading for a directory or group, dimmed and marked when inactive.
pub fn heading(theme: &ThemeContext, text: &str, inactive: bool) -> String {
    match (inactive, theme.is_color()) {
        (false, true) => text.bold().to_string(),
        (false, false) => text.to_string(),
        (true, true) => format!("{} (inactive)", text).dimmed().to_string(),
        (true, false) => format!("{} (inactive)", text),
    }
}

/// `passes/ntests` with percentage.
pub fn counts(run: &TestRun) -> String {
    pass_counts(run.passes, run.fails)
}

/// `passes/total (pct%)`; `0/0` when there are no tests.
pub fn pass_counts(passes: u64, fails: u64) -> String {
    let total = passes.saturating_add(fails);
    if total == 0 {
        return "0/0".to_string();
    }
    let ratio = passes as f64 / total as f64;
    format!("{}/{} ({:.0}%)", passes, total, ratio * 100.0)
}

pub fn timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
