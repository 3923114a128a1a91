use crossbeam_channel::Receiver;
use tracing::{debug, trace};

use crate::error::{MalformedEvent, MalformedReason};
use crate::models::{Direction, EventRecord};
use crate::parser;
use crate::store::{InboundStore, OutboundStore, RecordOutcome};

/// Inbound when `IN=` is populated, outbound when only `OUT=` is.
pub fn classify(record: &EventRecord) -> Result<Direction, MalformedEvent> {
    match (record.in_iface.is_empty(), record.out_iface.is_empty()) {
        (false, _) => Ok(Direction::Inbound),
        (true, false) => Ok(Direction::Outbound),
        (true, true) => Err(MalformedEvent::new(MalformedReason::NoInterface)),
    }
}

/// `classify`, additionally rejecting records that claim both directions.
pub fn checked_direction(record: &EventRecord) -> Result<Direction, MalformedEvent> {
    if !record.in_iface.is_empty() && !record.out_iface.is_empty() {
        return Err(MalformedEvent::new(MalformedReason::BothInterfaces));
    }
    classify(record)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub block_events: u64,
    pub malformed: u64,
    pub inbound: u64,
    pub outbound: u64,
}

impl ScanStats {
    fn update(&mut self, direction: Direction) {
        match direction {
            Direction::Inbound => self.inbound += 1,
            Direction::Outbound => self.outbound += 1,
        }
    }
}

/// Folds block events into one store per direction while a scan is running.
///
/// `finish` consumes the analyzer, so nothing can be recorded once a scan is done.
#[derive(Debug, Default)]
pub struct FirewallAnalyzer {
    inbound: InboundStore,
    outbound: OutboundStore,
    stats: ScanStats,
}

impl FirewallAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts, classifies and records one block line.
    pub fn process_line(&mut self, line: &str) -> Result<(Direction, RecordOutcome), MalformedEvent> {
        match parser::extract_fields(line) {
            Ok(record) => self.record(record),
            Err(err) => {
                self.stats.block_events += 1;
                self.skip(&err);
                debug!(line, "malformed line");
                Err(err)
            }
        }
    }

    /// Records an already extracted event in the store for its direction.
    pub fn record(&mut self, record: EventRecord) -> Result<(Direction, RecordOutcome), MalformedEvent> {
        self.stats.block_events += 1;

        let direction = match checked_direction(&record) {
            Ok(direction) => direction,
            Err(err) => {
                self.skip(&err);
                return Err(err);
            }
        };
        let outcome = match direction {
            Direction::Inbound => self.inbound.record_event(record),
            Direction::Outbound => self.outbound.record_event(record),
        };

        self.stats.update(direction);
        if let RecordOutcome::Inserted(index) = outcome {
            trace!(%direction, index, "new block event class");
        }
        Ok((direction, outcome))
    }

    fn skip(&mut self, err: &MalformedEvent) {
        self.stats.malformed += 1;
        debug!(reason = %err.reason, "skipping malformed block event");
    }

    /// Drains `rx` until the line source hangs up, then finishes the scan.
    pub fn run(mut self, rx: Receiver<String>) -> ScanResult {
        for line in rx {
            // malformed lines are already counted and logged
            let _ = self.process_line(&line);
        }
        self.finish()
    }

    pub fn finish(self) -> ScanResult {
        ScanResult {
            inbound: self.inbound,
            outbound: self.outbound,
            stats: self.stats,
        }
    }
}

/// Everything a finished scan hands to the report emitter.
#[derive(Debug)]
pub struct ScanResult {
    pub inbound: InboundStore,
    pub outbound: OutboundStore,
    pub stats: ScanStats,
}
