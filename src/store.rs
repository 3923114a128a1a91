// one representative record per equivalence class, in first-seen order

use std::marker::PhantomData;

use crate::models::EventRecord;
use crate::policy::{EquivalencePolicy, InboundPolicy, OutboundPolicy};

pub type InboundStore = AggregationStore<InboundPolicy>;
pub type OutboundStore = AggregationStore<OutboundPolicy>;

/// What `record_event` did with the record it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Folded into the entry at this index.
    Matched(usize),
    /// Stored as a new entry at this index.
    Inserted(usize),
}

/// Linearly scanned list of block events, deduplicated under policy `P`.
///
/// Entries are never removed or merged once inserted, so no two stored
/// entries are equivalent under `P`.
#[derive(Debug, Clone)]
pub struct AggregationStore<P> {
    entries: Vec<EventRecord>,
    policy: PhantomData<P>,
}

impl<P> Default for AggregationStore<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> AggregationStore<P> {
    pub fn new() -> Self {
        AggregationStore {
            entries: Vec::new(),
            policy: PhantomData,
        }
    }

    /// Stored entries in first-seen order.
    pub fn entries(&self) -> &[EventRecord] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all occurrence counts.
    pub fn total_events(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

impl<P: EquivalencePolicy> AggregationStore<P> {
    /// Bumps the first stored entry equivalent to `record`, or appends
    /// `record` with a count of 1 when nothing matches.
    pub fn record_event(&mut self, mut record: EventRecord) -> RecordOutcome {
        if let Some(index) = self
            .entries
            .iter()
            .position(|stored| P::matches(stored, &record))
        {
            self.entries[index].count += 1;
            return RecordOutcome::Matched(index);
        }

        record.count = 1;
        self.entries.push(record);
        RecordOutcome::Inserted(self.entries.len() - 1)
    }
}

impl<'a, P> IntoIterator for &'a AggregationStore<P> {
    type Item = &'a EventRecord;
    type IntoIter = std::slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
