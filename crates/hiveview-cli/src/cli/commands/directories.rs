use chrono::Utc;
use tracing::info;

use hiveview_core::{order_by_activity, summarize, DirectorySummary};

use super::Context;
use crate::cli::render::{heading, print_json, timestamp};
use crate::exit_codes::SUCCESS;

pub async fn run(ctx: &Context) -> anyhow::Result<i32> {
    let directories = ctx.client.fetch_directories().await?;
    let listings = ctx.client.fetch_all_listings(&directories).await;
    info!(
        discovered = directories.len(),
        loaded = listings.len(),
        "loaded directory listings"
    );

    let now = Utc::now();
    let summaries: Vec<DirectorySummary> = listings
        .iter()
        .map(|l| summarize(&l.directory, &l.runs, now))
        .collect();
    let summaries = order_by_activity(summaries, |s| s.inactive);

    if ctx.is_json() {
        print_json(&summaries)?;
        return Ok(SUCCESS);
    }

    if summaries.is_empty() {
        return ctx.not_found(format!("no directories found at {}", ctx.client.base_url()));
    }

    for s in &summaries {
        let latest = s.latest.map(timestamp).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<32} {:>6} runs {:>4} tests  latest {}",
            heading(&ctx.theme, &s.name, s.inactive),
            s.runs,
            s.tests,
            latest
        );
    }
    Ok(SUCCESS)
}
