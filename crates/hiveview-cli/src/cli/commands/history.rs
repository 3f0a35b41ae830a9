use chrono::{DateTime, Utc};
use serde::Serialize;

use hiveview_core::{compute_trends, history_for, ClientCombo, HealthTier, TestRun, Trend};

use super::Context;
use crate::cli::args::HistoryArgs;
use crate::cli::render::{counts, pass_counts, print_json, tier_label, timestamp, trend_mark};
use crate::exit_codes::SUCCESS;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    pub start: DateTime<Utc>,
    pub passes: u64,
    pub fails: u64,
    pub pass_ratio: Option<f64>,
    pub tier: HealthTier,
    pub trend: Trend,
    pub file_name: String,
}

/// One row per run, newest first; the oldest run has no trend.
pub fn history_rows(history: &[TestRun]) -> Vec<HistoryRow> {
    let trends = compute_trends(history);
    history
        .iter()
        .enumerate()
        .map(|(i, run)| HistoryRow {
            start: run.start,
            passes: run.passes,
            fails: run.fails,
            pass_ratio: run.pass_ratio(),
            tier: run.health(),
            trend: trends.get(i).copied().unwrap_or(Trend::Flat),
            file_name: run.file_name.clone(),
        })
        .collect()
}

pub fn print_history_rows(ctx: &Context, rows: &[HistoryRow], indent: &str) {
    for row in rows {
        println!(
            "{}{} {} {:<14} {} {}",
            indent,
            timestamp(row.start),
            tier_label(&ctx.theme, row.tier),
            pass_counts(row.passes, row.fails),
            trend_mark(&ctx.theme, row.trend),
            row.file_name
        );
    }
}

pub async fn run(ctx: &Context, args: HistoryArgs) -> anyhow::Result<i32> {
    let directory = ctx.client.find_directory(&args.directory).await?;
    let runs = ctx.client.fetch_listing(&directory).await?;

    let combo = ClientCombo::new(args.clients.iter().cloned());
    let history = history_for(&runs, &args.test, &combo, args.window);

    if history.is_empty() {
        return ctx.not_found(format!("no runs found for {} on {}", args.test, combo));
    }

    let rows = history_rows(&history);
    if ctx.is_json() {
        print_json(&rows)?;
        return Ok(SUCCESS);
    }

    let latest = &history[0];
    println!("{} on {}: latest {}", args.test, combo, counts(latest));
    print_history_rows(ctx, &rows, "  ");
    Ok(SUCCESS)
}
