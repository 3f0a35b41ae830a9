use clap::{Parser, Subcommand, ValueEnum};

use hiveview_core::{GroupBy, HealthTier, SortBy, DEFAULT_HISTORY_WINDOW};

#[derive(Parser)]
#[command(
    name = "hiveview",
    version,
    about = "Browse hive test results: latest run per test and client combination, trends and log excerpts"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Base URL serving discovery.json
    #[arg(long, global = true, env = "HIVEVIEW_URL", default_value = "http://localhost:8080")]
    pub url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "HIVEVIEW_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Retries for transient failures (0 = fail fast)
    #[arg(long, global = true, env = "HIVEVIEW_MAX_RETRIES", default_value_t = 0)]
    pub max_retries: u32,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

#[derive(Subcommand)]
pub enum Command {
    /// List result directories, active ones first
    Directories,
    /// Latest run per test and client combination
    Matrix(MatrixArgs),
    /// Recent runs of one test on one client combination, with trend
    History(HistoryArgs),
    /// Test cases of one suite run
    Suite(SuiteArgs),
    /// Show a log file or a byte range of it
    Log(LogArgs),
    /// Rollup of one directory
    Summary(SummaryArgs),
    Version,
}

#[derive(clap::Args, Clone, Debug)]
pub struct MatrixArgs {
    /// Directory name from discovery.json
    pub directory: String,

    #[arg(long, value_enum, default_value_t = GroupByArg::Test)]
    pub group_by: GroupByArg,

    /// Only show this group (test name, or `+`-joined clients)
    #[arg(long)]
    pub group: Option<String>,

    #[arg(long, value_enum, default_value_t = SortArg::Name)]
    pub sort: SortArg,

    /// Case-insensitive substring of test or client name
    #[arg(long)]
    pub filter: Option<String>,

    /// Only show runs of this health tier
    #[arg(long, value_enum)]
    pub tier: Option<TierArg>,

    /// Expand the card with this index (history with trend)
    #[arg(long)]
    pub details: Option<usize>,

    /// Runs of history used for trends
    #[arg(long, default_value_t = DEFAULT_HISTORY_WINDOW)]
    pub window: usize,
}

#[derive(clap::Args, Clone, Debug)]
pub struct HistoryArgs {
    pub directory: String,

    /// Test (suite) name
    pub test: String,

    /// Client names of the combination, in any order
    #[arg(required = true, num_args = 1..)]
    pub clients: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_HISTORY_WINDOW)]
    pub window: usize,
}

#[derive(clap::Args, Clone, Debug)]
pub struct SuiteArgs {
    pub directory: String,

    /// Suite file name from the listing (fileName)
    pub file: String,

    /// Only list failing test cases
    #[arg(long)]
    pub failed: bool,

    /// Print the details of one test case
    #[arg(long)]
    pub case: Option<String>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct LogArgs {
    pub directory: String,

    /// File under results/
    pub file: String,

    /// First byte of the excerpt
    #[arg(long, requires = "end")]
    pub begin: Option<u64>,

    /// End of the excerpt (exclusive)
    #[arg(long, requires = "begin")]
    pub end: Option<u64>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct SummaryArgs {
    pub directory: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum GroupByArg {
    #[default]
    Test,
    Client,
}

impl From<GroupByArg> for GroupBy {
    fn from(arg: GroupByArg) -> Self {
        match arg {
            GroupByArg::Test => GroupBy::Test,
            GroupByArg::Client => GroupBy::Client,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum SortArg {
    #[default]
    Name,
    Coverage,
    Time,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortBy::Name,
            SortArg::Coverage => SortBy::Coverage,
            SortArg::Time => SortBy::Time,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum TierArg {
    Pass,
    Partial,
    Fail,
}

impl From<TierArg> for HealthTier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Pass => HealthTier::AllPass,
            TierArg::Partial => HealthTier::PartialFail,
            TierArg::Fail => HealthTier::MostlyFail,
        }
    }
}
