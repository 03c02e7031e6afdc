//! Append-only dream history

use super::record::DreamRecord;

/// Ordered history of committed dreams for one session.
///
/// Records are only ever appended; there is no removal or mutation.
#[derive(Debug, Clone, Default)]
pub struct DreamHistory {
    records: Vec<DreamRecord>,
}

impl DreamHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, record: DreamRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn records(&self) -> &[DreamRecord] {
        &self.records
    }

    /// Records most-recent-first, for display
    pub fn recent_first(&self) -> impl Iterator<Item = &DreamRecord> {
        self.records.iter().rev()
    }

    pub fn latest(&self) -> Option<&DreamRecord> {
        self.records.last()
    }
}
