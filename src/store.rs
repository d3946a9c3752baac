use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;

use crate::models::{ApartmentId, ApartmentRecord};

pub type Snapshot = Arc<Vec<ApartmentRecord>>;

#[derive(Debug, thiserror::Error)]
#[error("snapshot contains apartment {0} more than once")]
pub struct DuplicateId(pub ApartmentId);

/// Last collection fetched from the backend. Contents are only ever swapped for a
/// whole new snapshot, so a reader never sees old and new records mixed.
#[derive(Debug)]
pub struct RecordStore {
    tx: watch::Sender<Snapshot>,
}

impl RecordStore {
    pub fn new() -> RecordStore {
        let (tx, _) = watch::channel(Arc::new(Vec::new()));
        RecordStore { tx }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Receiver that wakes up on every replacement.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    pub fn get(&self, id: &ApartmentId) -> Option<ApartmentRecord> {
        self.tx.borrow().iter().find(|r| &r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Swaps in a fresh snapshot. A snapshot with repeated ids is refused and the
    /// previous contents stay in place.
    pub fn replace(&self, records: Vec<ApartmentRecord>) -> Result<(), DuplicateId> {
        let mut seen = HashSet::with_capacity(records.len());
        if let Some(dup) = records.iter().find(|r| !seen.insert(&r.id)) {
            return Err(DuplicateId(dup.id.clone()));
        }

        self.tx.send_replace(Arc::new(records));
        Ok(())
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
