use chrono::Utc;

use hiveview_core::{summarize, HealthTier};

use super::Context;
use crate::cli::args::SummaryArgs;
use crate::cli::render::{heading, print_json, tier_label, timestamp};
use crate::exit_codes::SUCCESS;

pub async fn run(ctx: &Context, args: SummaryArgs) -> anyhow::Result<i32> {
    let directory = ctx.client.find_directory(&args.directory).await?;
    let runs = ctx.client.fetch_listing(&directory).await?;
    let summary = summarize(&directory, &runs, Utc::now());

    if ctx.is_json() {
        print_json(&summary)?;
        return Ok(SUCCESS);
    }

    println!("{}", heading(&ctx.theme, &summary.name, summary.inactive));
    println!("  address       {}", summary.address);
    println!("  runs          {}", summary.runs);
    println!("  tests         {}", summary.tests);
    println!("  combinations  {}", summary.client_combos);
    println!(
        "  latest        {}",
        summary
            .latest
            .map(timestamp)
            .unwrap_or_else(|| "no runs found".to_string())
    );
    println!(
        "  {} {}   {} {}   {} {}",
        tier_label(&ctx.theme, HealthTier::AllPass),
        summary.tiers.all_pass,
        tier_label(&ctx.theme, HealthTier::PartialFail),
        summary.tiers.partial_fail,
        tier_label(&ctx.theme, HealthTier::MostlyFail),
        summary.tiers.mostly_fail
    );
    Ok(SUCCESS)
}
