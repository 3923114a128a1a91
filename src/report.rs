//! Renders a finished scan as text or JSON.

use std::io::Write;

use crate::engine::ScanResult;
use crate::error::FirelogError;
use crate::models::dto::{InboundEntryDTO, OutboundEntryDTO, ReportDTO};
use crate::models::EventRecord;

const INBOUND_TITLE: &str = "firelog INPUT BLOCK Log Entries";
const OUTBOUND_TITLE: &str = "firelog OUTPUT BLOCK Log Entries";

/// One inbound entry.
///
/// Entries without a destination port (ICMP) drop `DPT=` and show the ICMP
/// `TYPE=` in place of `SPT=` when the log line carried one.
pub fn format_inbound(entry: &EventRecord) -> String {
    let head = format!(
        "Count: {} IN={} MAC={} SRC={} DST={} PROTO={}",
        entry.count,
        entry.in_iface,
        entry.mac.as_deref().unwrap_or_default(),
        entry.src,
        entry.dst,
        entry.protocol,
    );
    match (entry.has_dst_port(), entry.icmp_type) {
        (true, _) => format!("{head} SPT={} DPT={}", entry.src_port, entry.dst_port),
        (false, Some(icmp_type)) => format!("{head} TYPE={icmp_type}"),
        (false, None) => format!("{head} SPT={}", entry.src_port),
    }
}

pub fn format_outbound(entry: &EventRecord) -> String {
    format!(
        "Count: {} OUT={} SRC={} DST={} PROTO={} SPT={} DPT={}",
        entry.count, entry.out_iface, entry.src, entry.dst, entry.protocol, entry.src_port, entry.dst_port,
    )
}

fn write_box<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    let bar = "═".repeat(title.chars().count() + 2);
    writeln!(out, "╔{bar}╗")?;
    writeln!(out, "║ {title} ║")?;
    writeln!(out, "╚{bar}╝")?;
    writeln!(out)
}

fn write_section<'a, W, I, F>(out: &mut W, title: &str, entries: I, format: F) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a EventRecord>,
    F: Fn(&EventRecord) -> String,
{
    let mut entries = entries.into_iter().peekable();
    if entries.peek().is_none() {
        return Ok(());
    }

    write_box(out, title)?;
    for entry in entries {
        writeln!(out, "{}", format(entry))?;
    }
    writeln!(out)
}

/// Plain text report. Empty directions are left out entirely.
pub fn write_text<W: Write>(out: &mut W, result: &ScanResult) -> Result<(), FirelogError> {
    write_section(out, INBOUND_TITLE, &result.inbound, format_inbound)?;
    write_section(out, OUTBOUND_TITLE, &result.outbound, format_outbound)?;
    out.flush()?;
    Ok(())
}

pub fn to_dto(result: &ScanResult, source: &str) -> ReportDTO {
    ReportDTO {
        generated_at: chrono::Utc::now().to_rfc3339(),
        source: source.to_string(),
        inbound: result.inbound.iter().map(InboundEntryDTO::from).collect(),
        outbound: result.outbound.iter().map(OutboundEntryDTO::from).collect(),
    }
}

pub fn write_json<W: Write>(out: &mut W, result: &ScanResult, source: &str) -> Result<(), FirelogError> {
    serde_json::to_writer_pretty(&mut *out, &to_dto(result, source))?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
