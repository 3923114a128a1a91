pub mod domain {
    use std::fmt;

    /// Which side of the host a blocked packet was travelling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Direction {
        Inbound,
        Outbound,
    }

    impl fmt::Display for Direction {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Direction::Inbound => f.write_str("inbound"),
                Direction::Outbound => f.write_str("outbound"),
            }
        }
    }

    /// One firewall BLOCK event pulled out of a log line.
    ///
    /// `dst_port == 0` means the packet carried no port (ICMP and friends).
    /// `icmp_type` is carried for reporting only and takes no part in matching.
    /// `count` only means something once the record sits in a store.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct EventRecord {
        pub in_iface: String,
        pub out_iface: String,
        pub mac: Option<String>,
        pub src: String,
        pub dst: String,
        pub protocol: String,
        pub src_port: u16,
        pub dst_port: u16,
        pub icmp_type: Option<u8>,
        pub count: u64,
    }

    impl EventRecord {
        pub fn has_dst_port(&self) -> bool {
            self.dst_port != 0
        }
    }
}

pub mod dto {
    use serde::Serialize;

    use super::domain::EventRecord;

    #[derive(Debug, Serialize, Clone, PartialEq, Eq)]
    pub struct InboundEntryDTO {
        pub count: u64,
        #[serde(rename = "in")]
        pub in_iface: String,
        pub mac: String,
        pub src: String,
        pub dst: String,
        pub proto: String,
        pub spt: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub dpt: Option<u16>,
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        pub icmp_type: Option<u8>,
    }

    impl From<&EventRecord> for InboundEntryDTO {
        fn from(record: &EventRecord) -> Self {
            InboundEntryDTO {
                count: record.count,
                in_iface: record.in_iface.clone(),
                mac: record.mac.clone().unwrap_or_default(),
                src: record.src.clone(),
                dst: record.dst.clone(),
                proto: record.protocol.clone(),
                spt: record.src_port,
                dpt: record.has_dst_port().then_some(record.dst_port),
                icmp_type: record.icmp_type,
            }
        }
    }

    #[derive(Debug, Serialize, Clone, PartialEq, Eq)]
    pub struct OutboundEntryDTO {
        pub count: u64,
        #[serde(rename = "out")]
        pub out_iface: String,
        pub src: String,
        pub dst: String,
        pub proto: String,
        pub spt: u16,
        pub dpt: u16,
    }

    impl From<&EventRecord> for OutboundEntryDTO {
        fn from(record: &EventRecord) -> Self {
            OutboundEntryDTO {
                count: record.count,
                out_iface: record.out_iface.clone(),
                src: record.src.clone(),
                dst: record.dst.clone(),
                proto: record.protocol.clone(),
                spt: record.src_port,
                dpt: record.dst_port,
            }
        }
    }

    #[derive(Debug, Serialize, Clone)]
    pub struct ReportDTO {
        pub generated_at: String,
        pub source: String,
        pub inbound: Vec<InboundEntryDTO>,
        pub outbound: Vec<OutboundEntryDTO>,
    }
}

pub use domain::{Direction, EventRecord};
