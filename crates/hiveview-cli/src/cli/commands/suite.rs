use serde::Serialize;

use hiveview_core::HealthTier;

use super::Context;
use crate::cli::args::SuiteArgs;
use crate::cli::render::{heading, print_json, tier_label};
use crate::exit_codes::SUCCESS;

#[derive(Serialize)]
struct CaseRow<'a> {
    id: &'a str,
    name: &'a str,
    pass: bool,
    clients: Vec<&'a str>,
}

pub async fn run(ctx: &Context, args: SuiteArgs) -> anyhow::Result<i32> {
    let directory = ctx.client.find_directory(&args.directory).await?;
    let suite = ctx.client.fetch_suite(&directory, &args.file).await?;

    if let Some(case_id) = &args.case {
        let details = ctx
            .client
            .fetch_case_details(&directory, &suite, case_id)
            .await?;
        if ctx.is_json() {
            print_json(&serde_json::json!({ "case": case_id, "details": details }))?;
        } else if details.is_empty() {
            println!("no details recorded for case {}", case_id);
        } else {
            println!("{}", details);
        }
        return Ok(SUCCESS);
    }

    let rows: Vec<CaseRow<'_>> = suite
        .cases_in_order()
        .into_iter()
        .filter(|(_, case)| !args.failed || !case.summary_result.pass)
        .map(|(id, case)| CaseRow {
            id,
            name: case.name.as_str(),
            pass: case.summary_result.pass,
            clients: case.client_info.values().map(|c| c.name.as_str()).collect(),
        })
        .collect();

    if ctx.is_json() {
        print_json(&rows)?;
        return Ok(SUCCESS);
    }

    println!("{}", heading(&ctx.theme, &suite.name, false));
    if !suite.description.is_empty() {
        println!("{}", suite.description.lines().next().unwrap_or_default());
    }
    for (client, version) in &suite.client_versions {
        println!("  {client}: {version}");
    }
    println!(
        "{} cases, {} passed, {} failed",
        suite.test_cases.len(),
        suite.passes(),
        suite.fails()
    );

    if rows.is_empty() {
        return ctx.not_found("no test cases found");
    }

    for row in &rows {
        let tier = if row.pass {
            HealthTier::AllPass
        } else {
            HealthTier::MostlyFail
        };
        println!(
            "  {:>5} {} {} [{}]",
            row.id,
            tier_label(&ctx.theme, tier),
            row.name,
            row.clients.join(", ")
        );
    }
    Ok(SUCCESS)
}
