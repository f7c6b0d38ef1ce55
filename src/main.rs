//! topicwatch - Kafka topic-change notifier
//!
//! Reads topicctl apply results as JSON lines on stdin and forwards rendered
//! change notifications to the configured destinations.

use anyhow::{bail, Result};
use clap::Parser;
use tokio::io::BufReader;
use topicwatch::{
    cli::Cli,
    config::Config,
    dispatch,
    notify::{datadog::DatadogSink, slack::SlackSink, Notifier},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment,
    // and CLI args.
    let config = Config::load(cli)?;

    // Diagnostics go to stderr; stdout stays free for the event producer's
    // own plumbing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut sinks: Vec<Box<dyn Notifier>> = Vec::new();
    if let Some(datadog) = &config.datadog {
        sinks.push(Box::new(DatadogSink::new(
            datadog.api_base.clone(),
            datadog.api_key.clone(),
        )));
    }
    if let Some(slack) = &config.slack {
        sinks.push(Box::new(SlackSink::new(slack.webhook_url.clone())));
    }
    if sinks.is_empty() {
        bail!("no notification destinations configured; set [datadog] or [slack]");
    }

    info!(
        region = %config.region,
        sinks = sinks.len(),
        "topicwatch starting"
    );

    let stdin = BufReader::new(tokio::io::stdin());
    dispatch::run(stdin, &config.region, &sinks).await
}
