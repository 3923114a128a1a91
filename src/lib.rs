//! Firewall BLOCK log aggregation.
//!
//! Reads kernel firewall log lines, pulls the `KEY=value` fields out of each
//! `[... BLOCK]` entry and folds repeats into one counted entry per direction:
//! - inbound entries are keyed on the sending device (MAC, source, protocol,
//!   either port recurring)
//! - outbound entries are keyed on the destination (address, protocol, port)

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod parser;
pub mod policy;
pub mod report;
pub mod source;
pub mod store;

pub use engine::{classify, FirewallAnalyzer, ScanResult, ScanStats};
pub use error::{FirelogError, MalformedEvent, MalformedReason, SourceError};
pub use models::{Direction, EventRecord};
pub use parser::{extract_fields, is_block_event};
pub use policy::{EquivalencePolicy, InboundPolicy, OutboundPolicy};
pub use store::{AggregationStore, InboundStore, OutboundStore, RecordOutcome};
