use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use quickdrop_core::models::{FileRecord, LinkId, NewFileRecord};

use crate::id::generate_link_id;

#[derive(Default)]
struct Inner {
    records: HashMap<LinkId, FileRecord>,
    next_seq: u64,
}

/// Concurrent map from link identifier to file record.
///
/// A single mutex guards every read and write of the map. No operation holds
/// the lock across filesystem I/O or awaits, so lock hold times stay bounded
/// by map operations. Insertion is visible to lookups before the identifier
/// is returned to the caller.
#[derive(Default)]
pub struct LinkRegistry {
    inner: Mutex<Inner>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means another thread panicked mid-operation;
        // the map itself is still consistent (every mutation is a single
        // HashMap call), so recover the guard.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert a record, minting a fresh identifier for it.
    pub fn insert(&self, new: NewFileRecord) -> LinkId {
        self.insert_at(new, Instant::now())
    }

    /// Insert with an explicit creation instant. Expiry tests drive time
    /// through this and `sweep_expired`.
    pub fn insert_at(&self, new: NewFileRecord, created_at: Instant) -> LinkId {
        let mut inner = self.lock();

        let id = loop {
            let candidate = generate_link_id();
            if !inner.records.contains_key(&candidate) {
                break candidate;
            }
            tracing::debug!(link_id = %candidate, "Link id collision, retrying");
        };

        let seq = inner.next_seq;
        inner.next_seq += 1;

        let record = FileRecord {
            id: id.clone(),
            file_path: new.file_path,
            qr_path: new.qr_path,
            original_filename: new.original_filename,
            content_type: new.content_type,
            extracted_text: new.extracted_text,
            created_at,
            seq,
        };
        inner.records.insert(id.clone(), record);

        tracing::debug!(link_id = %id, seq, "Link registered");
        id
    }

    /// Look up a live record.
    ///
    /// Returns `None` for unknown identifiers, and also when the backing file
    /// has been removed from disk behind our back; in that case the stale
    /// entry is evicted as a side effect (lazy invalidation). The existence
    /// check runs outside the lock.
    pub async fn lookup(&self, id: &LinkId) -> Option<FileRecord> {
        let record = self.lock().records.get(id).cloned()?;

        if tokio::fs::try_exists(&record.file_path).await.unwrap_or(false) {
            return Some(record);
        }

        tracing::info!(
            link_id = %id,
            path = %record.file_path.display(),
            "Backing file missing, evicting stale link"
        );
        self.remove(id);
        None
    }

    /// Remove a record by id. Removing an absent record is a no-op, so this
    /// is safe to race with `sweep_expired`.
    pub fn remove(&self, id: &LinkId) -> Option<FileRecord> {
        self.lock().records.remove(id)
    }

    /// Atomically remove and return every record older than `max_age` at
    /// `now`. The caller deletes the evicted records' backing files; the
    /// registry does no file I/O here.
    pub fn sweep_expired(&self, now: Instant, max_age: Duration) -> Vec<FileRecord> {
        let mut inner = self.lock();

        let expired: Vec<LinkId> = inner
            .records
            .values()
            .filter(|record| record.is_expired(now, max_age))
            .map(|record| record.id.clone())
            .collect();

        expired
            .iter()
            .filter_map(|id| inner.records.remove(id))
            .collect()
    }

    /// The most recently inserted live record, used as implicit context for
    /// question answering. The context is shared by all callers.
    pub fn last_inserted(&self) -> Option<FileRecord> {
        self.lock()
            .records
            .values()
            .max_by_key(|record| record.seq)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
