//! Memoized document loading
//!
//! Loading is pure for a given file content, so the flattened table is kept
//! per file and only rebuilt when the file's modification time or size
//! changes, or when the entry is invalidated explicitly.

use crate::error::LoadError;
use crate::extractor::Extractor;
use crate::types::SkippedEntry;
use chronicle_domain::{Record, RecordLoader};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

/// Identity of a file version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: SystemTime,
    len: u64,
}

/// A memoized extraction
#[derive(Debug, Clone)]
pub struct CacheEntry {
    stamp: FileStamp,
    records: Arc<Vec<Record>>,
    skipped: Arc<Vec<SkippedEntry>>,
}

impl CacheEntry {
    /// Flattened records
    pub fn records(&self) -> &Arc<Vec<Record>> {
        &self.records
    }

    /// Entries dropped for unparseable dates
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }
}

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Loads served from memory
    pub hits: u64,
    /// Loads that read and flattened the file
    pub misses: u64,
    /// Files currently cached
    pub entries: usize,
}

/// Record table cache keyed by file path and modification time
#[derive(Debug, Default)]
pub struct RecordCache {
    extractor: Extractor,
    entries: HashMap<PathBuf, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl RecordCache {
    /// Create an empty cache using the given extractor
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Load the records for `path`, re-reading only if the file changed
    pub fn load_entry(&mut self, path: &Path) -> Result<&CacheEntry, LoadError> {
        let key = canonical(path)?;
        let stamp = stamp(&key)?;

        let fresh = self
            .entries
            .get(&key)
            .is_some_and(|entry| entry.stamp == stamp);

        if fresh {
            self.hits += 1;
            debug!("Record cache hit for {}", key.display());
        } else {
            self.misses += 1;
            let entry = self.read(&key, stamp)?;
            self.entries.insert(key.clone(), entry);
        }

        self.entries
            .get(&key)
            .ok_or_else(|| LoadError::Config(format!("cache entry for {} vanished", key.display())))
    }

    fn read(&self, path: &Path, stamp: FileStamp) -> Result<CacheEntry, LoadError> {
        let limit = self.extractor.config().max_document_bytes;
        if stamp.len > limit {
            return Err(LoadError::TooLarge(stamp.len, limit));
        }

        info!("Loading records from {}", path.display());
        let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let result = self.extractor.extract_document(&json)?;

        Ok(CacheEntry {
            stamp,
            records: Arc::new(result.records),
            skipped: Arc::new(result.skipped),
        })
    }

    /// Drop the memoized table for `path`
    pub fn invalidate_path(&mut self, path: &Path) {
        let key = canonical(path).unwrap_or_else(|_| path.to_path_buf());
        if self.entries.remove(&key).is_some() {
            debug!("Invalidated record cache for {}", key.display());
        }
    }

    /// Drop every memoized table
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

impl RecordLoader for RecordCache {
    type Error = LoadError;

    fn load(&mut self, path: &Path) -> Result<Arc<Vec<Record>>, Self::Error> {
        self.load_entry(path).map(|entry| Arc::clone(&entry.records))
    }

    fn invalidate(&mut self, path: &Path) {
        self.invalidate_path(path);
    }
}

fn canonical(path: &Path) -> Result<PathBuf, LoadError> {
    fs::canonicalize(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn stamp(path: &Path) -> Result<FileStamp, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(io_err)?;
    let modified = metadata.modified().map_err(io_err)?;
    Ok(FileStamp {
        modified,
        len: metadata.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{set_file_mtime, FileTime};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ONE_EVENT: &str = r#"[{"chunk_id": "c1", "page": 5,
        "model_output": {"events": [{"date": "1990-03-01", "label": "Clash"}]}}]"#;

    const TWO_EVENTS: &str = r#"[{"chunk_id": "c1", "page": 5,
        "model_output": {"events": [
            {"date": "1990-03-01", "label": "Clash"},
            {"date": "1990-03-02", "label": "Ceasefire"}
        ]}}]"#;

    fn write_doc(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_second_load_is_a_hit() {
        let file = write_doc(ONE_EVENT);
        let mut cache = RecordCache::default();

        let first = cache.load(file.path()).unwrap();
        let second = cache.load(file.path()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1, entries: 1 });
    }

    #[test]
    fn test_modified_file_is_reloaded() {
        let file = write_doc(ONE_EVENT);
        let mut cache = RecordCache::default();
        assert_eq!(cache.load(file.path()).unwrap().len(), 1);

        std::fs::write(file.path(), TWO_EVENTS).unwrap();
        set_file_mtime(file.path(), FileTime::from_unix_time(1_000_000_000, 0)).unwrap();

        assert_eq!(cache.load(file.path()).unwrap().len(), 2);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let file = write_doc(ONE_EVENT);
        let mut cache = RecordCache::default();
        cache.load(file.path()).unwrap();

        cache.invalidate(file.path());
        assert_eq!(cache.stats().entries, 0);

        cache.load(file.path()).unwrap();
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut cache = RecordCache::default();
        let result = cache.load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_malformed_file_is_not_cached() {
        let file = write_doc("{\"not\": \"a list\"}");
        let mut cache = RecordCache::default();
        assert!(matches!(cache.load(file.path()), Err(LoadError::InvalidFormat(_))));
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_skipped_entries_exposed() {
        let file = write_doc(r#"[{"events": [{"date": "unknown"}, {"date": "1990-01-01"}]}]"#);
        let mut cache = RecordCache::default();
        let entry = cache.load_entry(file.path()).unwrap();
        assert_eq!(entry.records().len(), 1);
        assert_eq!(entry.skipped().len(), 1);
    }

    #[test]
    fn test_clear() {
        let file = write_doc(ONE_EVENT);
        let mut cache = RecordCache::default();
        cache.load(file.path()).unwrap();
        cache.clear();
        assert_eq!(cache.stats().entries, 0);
    }
}
