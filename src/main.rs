use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use streamscribe::cli::Cli;
use streamscribe::streaming::{ChunkerConfig, SchedulerConfig, StreamOptions};
use streamscribe::{OpenAiConfig, OpenAiService, transcribe_streaming};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let service = Arc::new(OpenAiService::new(OpenAiConfig::from_env()?));

    let options = StreamOptions {
        language: cli.language_code.clone(),
        chunker: ChunkerConfig {
            chunk_secs: cli.chunk_secs,
            overlap_secs: cli.overlap_secs,
            ..ChunkerConfig::default()
        },
        scheduler: SchedulerConfig {
            max_in_flight: cli.max_in_flight,
            ..SchedulerConfig::default()
        },
        ..StreamOptions::default()
    };

    let (language, mut segments) = transcribe_streaming(service, &cli.path, options).await?;

    if cli.language_code.is_none() && !cli.quiet {
        println!("Detected language: {}", language.name);
    }

    let mut stdout = std::io::stdout();
    while let Some(segment) = segments.next().await {
        let segment = segment?;
        write!(stdout, "{}", segment.text)?;
        stdout.flush()?;
    }
    writeln!(stdout)?;

    Ok(())
}
