//! stashgrid - grid inventory driver
//!
//! Builds an inventory from configuration, replays scripted pointer input
//! against it and prints the resulting state.

mod config;
mod headless;
mod scripted_input;

use anyhow::Result;
use config::AppConfig;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting stashgrid v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let app = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    };

    if let Some(path) = cli.write_config.as_deref() {
        app.save_to_path(path)?;
        info!(path = %path.display(), "wrote effective config");
        return Ok(());
    }

    if cli.quiet && cli.scripted_input.is_none() && cli.event_log.is_none() {
        tracing::warn!("--quiet without --script produces no output");
    }
    if cli.event_log.is_some() && cli.scripted_input.is_none() {
        tracing::warn!("--event-log has no effect without --script");
    }

    let report = headless::run(headless::HeadlessConfig {
        app,
        scripted_input: cli.scripted_input,
        event_log: cli.event_log,
        print_state: !cli.quiet,
    })?;
    info!(?report, "done");
    Ok(())
}

struct CliOptions {
    config: Option<PathBuf>,
    scripted_input: Option<PathBuf>,
    event_log: Option<PathBuf>,
    write_config: Option<PathBuf>,
    quiet: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            config: None,
            scripted_input: None,
            event_log: None,
            write_config: None,
            quiet: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--script" => {
                    if let Some(path) = args.next() {
                        opts.scripted_input = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--script requires a file path");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                "--write-config" => {
                    if let Some(path) = args.next() {
                        opts.write_config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--write-config requires a file path");
                    }
                }
                "--quiet" => opts.quiet = true,
                other => {
                    tracing::warn!(arg = %other, "Ignoring unknown argument");
                }
            }
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn parses_paths_and_flags() {
        let opts = parse(&[
            "--config",
            "a.toml",
            "--script",
            "b.json",
            "--event-log",
            "c.jsonl",
            "--quiet",
        ]);
        assert_eq!(opts.config, Some(PathBuf::from("a.toml")));
        assert_eq!(opts.scripted_input, Some(PathBuf::from("b.json")));
        assert_eq!(opts.event_log, Some(PathBuf::from("c.jsonl")));
        assert!(opts.quiet);
        assert!(opts.write_config.is_none());
    }

    #[test]
    fn missing_values_and_unknown_flags_are_skipped() {
        let opts = parse(&["--bogus", "--script"]);
        assert!(opts.scripted_input.is_none());
        assert!(!opts.quiet);
    }
}
