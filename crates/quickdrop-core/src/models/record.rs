//! Shared-upload domain model.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Public identifier naming a shared file.
///
/// Fixed-length alphanumeric token. Generation lives in the registry crate;
/// this type only carries the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkId(String);

impl LinkId {
    /// Length of a generated identifier
    pub const LEN: usize = 8;

    pub fn new(raw: impl Into<String>) -> Self {
        LinkId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One shared upload, as stored in the link registry.
///
/// Records are immutable after insertion. The record owns the lifecycle of
/// its backing file (and QR image, when present): whoever evicts the record
/// deletes those files.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: LinkId,
    /// Location of the stored file on disk
    pub file_path: PathBuf,
    /// Location of the generated QR image, when QR codes are enabled
    pub qr_path: Option<PathBuf>,
    /// Name the file was uploaded under, used for Content-Disposition
    pub original_filename: String,
    pub content_type: String,
    /// Best-effort text content, used as AI question-answering context.
    /// Empty when extraction failed or the file is not text-like.
    pub extracted_text: String,
    /// Insertion time; used solely to compute expiry
    pub created_at: Instant,
    /// Registry-assigned insertion sequence, backs `last_inserted`
    pub seq: u64,
}

impl FileRecord {
    /// Age of this record at `now`. Saturates to zero if `now` predates
    /// insertion (callers may pass arbitrary instants in tests).
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    pub fn is_expired(&self, now: Instant, max_age: Duration) -> bool {
        self.age(now) > max_age
    }
}

/// A record as handed to the registry, before an identifier is assigned.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub file_path: PathBuf,
    pub qr_path: Option<PathBuf>,
    pub original_filename: String,
    pub content_type: String,
    pub extracted_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at(created_at: Instant) -> FileRecord {
        FileRecord {
            id: LinkId::new("abcd1234"),
            file_path: PathBuf::from("/tmp/f"),
            qr_path: None,
            original_filename: "f.txt".to_string(),
            content_type: "text/plain".to_string(),
            extracted_text: String::new(),
            created_at,
            seq: 0,
        }
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let t = Instant::now();
        let record = record_at(t);
        let max_age = Duration::from_secs(900);

        // exactly max_age old: not yet expired
        assert!(!record.is_expired(t + max_age, max_age));
        assert!(record.is_expired(t + max_age + Duration::from_secs(1), max_age));
    }

    #[test]
    fn test_age_saturates_for_earlier_instants() {
        let t = Instant::now();
        let record = record_at(t + Duration::from_secs(10));
        assert_eq!(record.age(t), Duration::ZERO);
    }
}
