// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2html::{
    fetch_and_render, standalone_html, AppError, CommandLineInput, NotionHttpClient,
    RenderConfig, RenderedPage, TreeFetcher,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console output goes to stderr so that stdout carries only the rendered
/// HTML.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion2html.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Fetches and renders the configured page.
async fn render(config: &RenderConfig) -> Result<RenderedPage, AppError> {
    let client = NotionHttpClient::new(&config.api_key, config.api_base_url.clone())?;
    let fetcher = TreeFetcher::new(Arc::new(client), config.fetch.clone());
    fetch_and_render(&fetcher, &config.page_id).await
}

/// Writes the rendered page to the configured destination.
fn deliver(config: &RenderConfig, rendered: &RenderedPage) -> anyhow::Result<()> {
    let html = if config.standalone {
        standalone_html(&rendered.page, &rendered.body)
    } else {
        format!("{}\n", rendered.body.to_html())
    };

    match &config.output_file {
        Some(path) => {
            fs::write(path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "✓ Rendered '{}' to {}",
                rendered.page.display_title(),
                path.display()
            );
        }
        None => print!("{}", html),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).context("Failed to initialise logging")?;

    let config = RenderConfig::resolve(cli)?;

    let rendered = render(&config).await.map_err(|e| {
        if let Some(cause) = e.source_cause() {
            log::error!("{}: {}", e, cause);
        }
        e
    })?;

    deliver(&config, &rendered)
}
