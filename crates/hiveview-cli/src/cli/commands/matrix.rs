use chrono::Utc;
use serde::Serialize;

use hiveview_core::{
    compute_trends, group_runs, history_for, is_inactive, most_recent, sort_groups, ClientCombo,
    GroupBy, HealthTier, Popover, RunFilter, SortBy, TestRun, Trend,
};

use super::history::{history_rows, print_history_rows, HistoryRow};
use super::Context;
use crate::cli::args::MatrixArgs;
use crate::cli::render::{counts, heading, print_json, tier_label, timestamp, trend_mark};
use crate::exit_codes::SUCCESS;

#[derive(Serialize)]
struct MatrixView {
    directory: String,
    group_by: GroupBy,
    sort: SortBy,
    groups: Vec<GroupView>,
}

#[derive(Serialize)]
struct GroupView {
    key: String,
    inactive: bool,
    cards: Vec<Card>,
}

#[derive(Serialize)]
struct Card {
    index: usize,
    label: String,
    tier: HealthTier,
    trend: Trend,
    run: TestRun,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<HistoryRow>>,
}

pub async fn run(ctx: &Context, args: MatrixArgs) -> anyhow::Result<i32> {
    let directory = ctx.client.find_directory(&args.directory).await?;
    let runs = ctx.client.fetch_listing(&directory).await?;

    if runs.is_empty() {
        return ctx.not_found(format!("no runs found in {}", directory.name));
    }

    let mut filter = RunFilter::new();
    if let Some(text) = &args.filter {
        filter = filter.with_text(text.as_str());
    }
    if let Some(tier) = args.tier {
        filter = filter.with_tier(tier.into());
    }

    let by: GroupBy = args.group_by.into();
    let sort: SortBy = args.sort.into();
    let popover = Popover::from(args.details);
    let now = Utc::now();

    // Tier filtering applies to the latest run of each cell, so group first.
    let groups = sort_groups(&group_runs(&runs, by), sort);

    let only = args.group.as_deref().map(|key| match by {
        GroupBy::Test => key.to_string(),
        GroupBy::Client => ClientCombo::from_key(key).key(),
    });
    if let Some(key) = &only {
        if let Err(e) = groups.lookup(key) {
            return ctx.not_found(e.to_string());
        }
    }

    let mut index = 0;
    let mut view = MatrixView {
        directory: directory.name.clone(),
        group_by: by,
        sort,
        groups: Vec::new(),
    };

    for (key, group) in groups.iter() {
        if only.as_deref().is_some_and(|k| k != key) {
            continue;
        }
        let inactive = is_inactive(most_recent(group), now);
        let mut cards = Vec::new();
        for run in group.iter().filter(|r| filter.matches(r)) {
            let history = history_for(&runs, &run.name, &run.combo(), args.window);
            let trend = compute_trends(&history)
                .first()
                .copied()
                .unwrap_or(Trend::Flat);
            cards.push(Card {
                index,
                label: by.sub_key(run),
                tier: run.health(),
                trend,
                run: run.clone(),
                history: popover.is_open(index).then(|| history_rows(&history)),
            });
            index += 1;
        }
        if !cards.is_empty() {
            view.groups.push(GroupView {
                key: key.to_string(),
                inactive,
                cards,
            });
        }
    }

    if let Some(selected) = popover.selected() {
        if selected >= index {
            return ctx.not_found(format!("card {} not found ({} cards shown)", selected, index));
        }
    }

    if ctx.is_json() {
        print_json(&view)?;
        return Ok(SUCCESS);
    }

    if view.groups.is_empty() {
        return ctx.not_found("no runs match the current filter");
    }

    for group in &view.groups {
        println!("{}", heading(&ctx.theme, &group.key, group.inactive));
        for card in &group.cards {
            println!(
                "  [{:>3}] {:<40} {} {:<14} {} {}",
                card.index,
                card.label,
                tier_label(&ctx.theme, card.tier),
                counts(&card.run),
                trend_mark(&ctx.theme, card.trend),
                timestamp(card.run.start),
            );
            if let Some(history) = &card.history {
                print_history_rows(ctx, history, "        ");
            }
        }
    }
    Ok(SUCCESS)
}
