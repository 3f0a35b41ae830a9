pub mod directories;
pub mod dispatch;
pub mod history;
pub mod log;
pub mod matrix;
pub mod suite;
pub mod summary;

pub use dispatch::dispatch;

use anyhow::Context as _;
use hiveview_client::{ViewerClient, ViewerConfig};
use hiveview_core::ThemeContext;

use super::args::{GlobalArgs, OutputFormat};
use super::render::{print_json, theme_for};
use crate::exit_codes::NOT_FOUND;

/// Shared state handed to every command.
pub struct Context {
    pub client: ViewerClient,
    pub format: OutputFormat,
    pub theme: ThemeContext,
}

impl Context {
    pub fn from_args(args: &GlobalArgs) -> anyhow::Result<Self> {
        let config = ViewerConfig::from_env()
            .with_url(args.url.clone())
            .with_timeout(args.timeout)
            .with_max_retries(args.max_retries);
        let client = ViewerClient::new(config).context("failed to create results client")?;

        Ok(Self {
            client,
            format: args.format,
            theme: ThemeContext::new(theme_for(args.color)),
        })
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Report missing data and return [`NOT_FOUND`]. JSON output gets an
    /// `{"error": "not_found", "message": ...}` object.
    pub fn not_found(&self, message: impl Into<String>) -> anyhow::Result<i32> {
        let message = message.into();
        if self.is_json() {
            print_json(&serde_json::json!({ "error": "not_found", "message": message }))?;
        } else {
            println!("{}", message);
        }
        Ok(NOT_FOUND)
    }
}
