use anyhow::Context as _;
use tracing::info;

use hiveview_core::LogRange;

use super::Context;
use crate::cli::args::LogArgs;
use crate::cli::render::print_json;
use crate::exit_codes::SUCCESS;

pub async fn run(ctx: &Context, args: LogArgs) -> anyhow::Result<i32> {
    let directory = ctx.client.find_directory(&args.directory).await?;

    let (begin, end) = match (args.begin, args.end) {
        (Some(begin), Some(end)) => (begin, end),
        _ => {
            let text = ctx.client.fetch_text(&directory, &args.file).await?;
            if ctx.is_json() {
                print_json(&serde_json::json!({ "file": args.file, "content": text }))?;
            } else {
                print!("{}", text);
            }
            return Ok(SUCCESS);
        }
    };

    let range = LogRange::new(begin, end).context("invalid --begin/--end")?;
    let excerpt = ctx
        .client
        .fetch_log_range(&directory, &args.file, range)
        .await?;
    info!(
        url = %excerpt.url,
        partial = excerpt.partial,
        total_size = ?excerpt.total_size,
        "log excerpt"
    );

    if ctx.is_json() {
        print_json(&excerpt)?;
    } else {
        print!("{}", excerpt.content);
        if !excerpt.content.ends_with('\n') {
            println!();
        }
    }
    Ok(SUCCESS)
}
