// turns a kernel firewall log line into an EventRecord
//
// Oct 18 10:01:02 host kernel: [8812.31] [UFW BLOCK] IN=enp4s0 OUT= MAC=ff:..:00 SRC=192.168.1.110 DST=192.168.1.255 LEN=72 PROTO=UDP SPT=59391 DPT=15600 LEN=52

use crate::engine::checked_direction;
use crate::error::MalformedEvent;
use crate::models::EventRecord;

const BLOCK_TAG: &str = " BLOCK] ";

/// True if the line carries a firewall block header such as `[UFW BLOCK] `.
pub fn is_block_event(line: &str) -> bool {
    matches!(
        (line.find('['), line.rfind(BLOCK_TAG)),
        (Some(open), Some(tag)) if open < tag
    )
}

/// Pulls the recognised `KEY=value` tokens out of a block line.
///
/// Keys outside IN/OUT/MAC/SRC/DST/PROTO/SPT/DPT/TYPE are ignored, as is anything
/// without an `=`. The first occurrence of a key wins. Ports that are missing,
/// non-numeric or out of range come back as 0.
///
/// Fails only when the record has no single direction: neither or both of
/// IN/OUT populated.
pub fn extract_fields(line: &str) -> Result<EventRecord, MalformedEvent> {
    let mut fields = Fields::default();

    for token in line.split_ascii_whitespace() {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        let slot = match key {
            "IN" => &mut fields.in_iface,
            "OUT" => &mut fields.out_iface,
            "MAC" => &mut fields.mac,
            "SRC" => &mut fields.src,
            "DST" => &mut fields.dst,
            "PROTO" => &mut fields.protocol,
            "SPT" => &mut fields.src_port,
            "DPT" => &mut fields.dst_port,
            "TYPE" => &mut fields.icmp_type,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    fields.into_record()
}

#[derive(Default)]
struct Fields<'a> {
    in_iface: Option<&'a str>,
    out_iface: Option<&'a str>,
    mac: Option<&'a str>,
    src: Option<&'a str>,
    dst: Option<&'a str>,
    protocol: Option<&'a str>,
    src_port: Option<&'a str>,
    dst_port: Option<&'a str>,
    icmp_type: Option<&'a str>,
}

impl Fields<'_> {
    fn into_record(self) -> Result<EventRecord, MalformedEvent> {
        let record = EventRecord {
            in_iface: self.in_iface.unwrap_or_default().to_string(),
            out_iface: self.out_iface.unwrap_or_default().to_string(),
            mac: self.mac.map(str::to_string),
            src: self.src.unwrap_or_default().to_string(),
            dst: self.dst.unwrap_or_default().to_string(),
            protocol: self.protocol.unwrap_or_default().to_string(),
            src_port: parse_port(self.src_port),
            dst_port: parse_port(self.dst_port),
            icmp_type: self.icmp_type.and_then(|v| v.parse().ok()),
            count: 0,
        };

        checked_direction(&record)?;
        Ok(record)
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}
