//! Command-line and environment configuration.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Default log scanned when `--log-file` is not given.
pub const DEFAULT_LOG_FILE: &str = "/var/log/syslog";

/// Default number of lines buffered between the reader and the engine.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "firelog")]
#[command(version, about = "Summarize firewall BLOCK entries from a syslog file")]
pub struct Args {
    /// Log file to scan
    #[arg(short = 'f', long = "log-file", env = "FIRELOG_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Report format
    #[arg(long, env = "FIRELOG_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Lines buffered between the file reader and the aggregator
    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY as u32,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub channel_capacity: u32,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// Settings for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub log_file: PathBuf,
    pub format: OutputFormat,
    pub channel_capacity: usize,
    pub verbose: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            format: OutputFormat::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            verbose: 0,
        }
    }
}

impl ScanConfig {
    /// Builder: set the log file.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Builder: set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder: set the channel capacity (clamped to at least 1).
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }
}

impl From<Args> for ScanConfig {
    fn from(args: Args) -> Self {
        ScanConfig {
            log_file: args.log_file,
            format: args.format,
            channel_capacity: args.channel_capacity as usize,
            verbose: args.verbose,
        }
    }
}
