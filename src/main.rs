use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::info;

use firelog::config::{Args, OutputFormat, ScanConfig};
use firelog::engine::FirewallAnalyzer;
use firelog::error::{FirelogError, SourceError};
use firelog::{logging, report, source};

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let config = ScanConfig::from(Args::parse());
    logging::init_logging(config.verbose);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn exit_code(err: &FirelogError) -> u8 {
    match err {
        FirelogError::Source(SourceError::NotFound(_)) => 2,
        _ => 1,
    }
}

fn run(config: &ScanConfig) -> Result<(), FirelogError> {
    let (reader, rx) = source::spawn_reader(&config.log_file, config.channel_capacity)?;

    let result = FirewallAnalyzer::new().run(rx);
    let source_stats = reader.join()?;

    info!(
        lines = source_stats.lines_read,
        block_lines = source_stats.block_lines,
        malformed = result.stats.malformed,
        inbound_classes = result.inbound.len(),
        outbound_classes = result.outbound.len(),
        "scan complete"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.format {
        OutputFormat::Text => report::write_text(&mut out, &result),
        OutputFormat::Json => {
            report::write_json(&mut out, &result, &config.log_file.display().to_string())
        }
    }
}
