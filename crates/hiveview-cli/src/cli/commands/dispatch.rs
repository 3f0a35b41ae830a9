use super::Context;
use crate::cli::args::{Cli, Command};
use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    if let Command::Version = cli.cmd {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    let ctx = Context::from_args(&cli.global)?;
    match cli.cmd {
        Command::Directories => super::directories::run(&ctx).await,
        Command::Matrix(args) => super::matrix::run(&ctx, args).await,
        Command::History(args) => super::history::run(&ctx, args).await,
        Command::Suite(args) => super::suite::run(&ctx, args).await,
        Command::Log(args) => super::log::run(&ctx, args).await,
        Command::Summary(args) => super::summary::run(&ctx, args).await,
        Command::Version => Ok(SUCCESS),
    }
}
