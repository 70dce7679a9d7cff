use crate::api::FetchOptions;
use crate::constants::{DEFAULT_FETCH_DEPTH, NOTION_API_BASE_URL};
use crate::error::AppError;
use crate::types::{ApiBaseUrl, ApiKey, PageId, ValidationError};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion page URL or ID (e.g., "https://www.notion.so/...")
    pub notion_input: String,

    /// Write the rendered HTML to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Maximum nesting depth of blocks to fetch (clamped to 64)
    #[arg(long, default_value_t = DEFAULT_FETCH_DEPTH)]
    pub max_depth: usize,

    /// Number of concurrent API requests (default: number of CPUs, max 8)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Give up on the whole fetch after this many seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Emit a complete HTML document instead of a fragment
    #[arg(long, default_value_t = false)]
    pub standalone: bool,

    /// Base URL of the Notion API
    #[arg(long, env = "NOTION_API_BASE_URL", default_value = NOTION_API_BASE_URL)]
    pub api_base_url: String,
}

/// Resolved configuration, validated and ready to drive a render.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub page_id: PageId,
    pub api_key: ApiKey,
    pub api_base_url: ApiBaseUrl,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
    pub standalone: bool,
    pub fetch: FetchOptions,
}

impl RenderConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key = std::env::var("NOTION_API_KEY").map_err(|_| {
            AppError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;
        Self::from_parts(cli, api_key)
    }

    /// Resolves configuration with an explicitly supplied API key.
    pub fn from_parts(cli: CommandLineInput, api_key: String) -> Result<Self, AppError> {
        let api_key = ApiKey::new(api_key)?;
        let page_id = PageId::parse(&cli.notion_input)?;
        let api_base_url = ApiBaseUrl::parse(&cli.api_base_url)?;

        if cli.timeout == 0 {
            return Err(ValidationError::OutOfBounds {
                value: 0,
                min: 1,
                max: u64::MAX,
            }
            .into());
        }

        let mut fetch = FetchOptions::default()
            .with_max_depth(cli.max_depth)
            .with_deadline(Duration::from_secs(cli.timeout));
        if let Some(concurrency) = cli.concurrency {
            fetch = fetch.with_concurrency(concurrency);
        }

        Ok(RenderConfig {
            page_id,
            api_key,
            api_base_url,
            output_file: cli.output.map(PathBuf::from),
            verbose: cli.verbose,
            standalone: cli.standalone,
            fetch,
        })
    }
}
