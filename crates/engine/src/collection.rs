//! Collection: one named set of records behind a single RwLock
//!
//! ## Locking
//!
//! Mutations (`upsert_batch`, `delete_batch`, drop) take the write lock;
//! reads (`query`, `get`, `count`, `info`) take the read lock. Every
//! acquisition is bounded by the database's lock timeout and fails with
//! `Timeout` instead of waiting forever.
//!
//! A mutation validates everything first, appends to the WAL, then applies
//! in memory, all under the write lock. Readers never observe a half-applied
//! batch and WAL order matches apply order.
//!
//! ## Dropped collections
//!
//! Handles are `Arc`s and may outlive the registry entry. Once a collection
//! is dropped every operation through any handle fails with `NotFound`.

use crate::backend::{IndexBackendFactory, RecordSeq, VectorIndexBackend};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use quiver_core::validation::{validate_k, validate_record_id, validate_vector};
use quiver_core::{
    CancellationToken, CollectionInfo, DistanceMetric, Error, Metadata, MetadataFilter, Record,
    Result, VectorMatch,
};
use quiver_durability::{Wal, WalEntry};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Shared handle to a live collection
pub type CollectionHandle = Arc<Collection>;

/// Fixed attributes of a collection, set once at creation
#[derive(Debug, Clone)]
pub(crate) struct CollectionParams {
    pub id: u64,
    pub name: String,
    pub dimension: Option<usize>,
    pub metric: DistanceMetric,
    pub created_at: i64,
    pub metadata: Option<Metadata>,
}

struct StoredRecord {
    id: String,
    metadata: Option<Metadata>,
    document: Option<String>,
}

struct CollectionState {
    /// `None` until the first insert when not given at creation; frozen after
    dimension: Option<usize>,
    next_seq: RecordSeq,
    ids: FxHashMap<String, RecordSeq>,
    records: FxHashMap<RecordSeq, StoredRecord>,
    index: Box<dyn VectorIndexBackend>,
}

impl CollectionState {
    fn check_batch_dimension(&self, records: &[Record]) -> Result<()> {
        let Some(first) = records.first() else {
            return Ok(());
        };
        let expected = self.dimension.unwrap_or(first.vector.len());
        for record in records {
            if record.vector.len() != expected {
                return Err(Error::DimensionMismatch {
                    expected,
                    actual: record.vector.len(),
                });
            }
        }
        Ok(())
    }

    fn apply_upsert(&mut self, records: Vec<Record>) {
        for record in records {
            if self.dimension.is_none() {
                self.dimension = Some(record.vector.len());
            }

            // Replacing keeps the original insertion position.
            let seq = match self.ids.get(&record.id) {
                Some(&seq) => seq,
                None => {
                    let seq = self.next_seq;
                    self.next_seq += 1;
                    self.ids.insert(record.id.clone(), seq);
                    seq
                }
            };

            self.index.insert(seq, record.vector);
            self.records.insert(
                seq,
                StoredRecord {
                    id: record.id,
                    metadata: record.metadata,
                    document: record.document,
                },
            );
        }
    }

    fn apply_delete(&mut self, ids: &[String]) -> usize {
        let mut removed = 0;
        for id in ids {
            if let Some(seq) = self.ids.remove(id) {
                self.index.delete(seq);
                self.records.remove(&seq);
                removed += 1;
            }
        }
        removed
    }

    fn record(&self, id: &str) -> Option<Record> {
        let seq = *self.ids.get(id)?;
        let stored = self.records.get(&seq)?;
        let vector = self.index.get(seq)?;
        Some(Record {
            id: stored.id.clone(),
            vector: vector.to_vec(),
            metadata: stored.metadata.clone(),
            document: stored.document.clone(),
        })
    }

    fn clear(&mut self) {
        self.ids.clear();
        self.records.clear();
        self.index.clear();
    }
}

/// Append `entry` to the WAL when the database is durable.
pub(crate) fn append_to_wal(wal: Option<&Wal>, entry: &WalEntry) -> Result<()> {
    let Some(wal) = wal else {
        return Ok(());
    };
    wal.append(entry).map_err(|e| {
        error!(kind = entry.kind(), collection = entry.collection(), error = %e, "WAL append failed");
        Error::from(e)
    })
}

/// A named collection of records
pub struct Collection {
    params: CollectionParams,
    lock_timeout: Duration,
    wal: Option<Arc<Wal>>,
    dropped: AtomicBool,
    state: RwLock<CollectionState>,
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("id", &self.params.id)
            .field("name", &self.params.name)
            .field("metric", &self.params.metric)
            .field("dropped", &self.is_dropped())
            .finish()
    }
}

impl Collection {
    pub(crate) fn new(
        params: CollectionParams,
        backend: IndexBackendFactory,
        lock_timeout: Duration,
        wal: Option<Arc<Wal>>,
    ) -> Self {
        let state = CollectionState {
            dimension: params.dimension,
            next_seq: 0,
            ids: FxHashMap::default(),
            records: FxHashMap::default(),
            index: backend.create(params.metric),
        };
        Collection {
            params,
            lock_timeout,
            wal,
            dropped: AtomicBool::new(false),
            state: RwLock::new(state),
        }
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.params.name
    }

    /// Registry-wide sequence number
    pub fn id(&self) -> u64 {
        self.params.id
    }

    /// Distance metric
    pub fn metric(&self) -> DistanceMetric {
        self.params.metric
    }

    /// Creation timestamp (microseconds since epoch)
    pub fn created_at(&self) -> i64 {
        self.params.created_at
    }

    /// Collection-level metadata
    pub fn metadata(&self) -> Option<&Metadata> {
        self.params.metadata.as_ref()
    }

    /// Check if the collection has been deleted
    pub fn is_dropped(&self) -> bool {
        self.dropped.load(Ordering::Acquire)
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, CollectionState>> {
        let guard = self.state.try_read_for(self.lock_timeout).ok_or_else(|| {
            Error::Timeout(format!(
                "read lock on collection '{}' not acquired within {:?}",
                self.params.name, self.lock_timeout
            ))
        })?;
        if self.is_dropped() {
            return Err(Error::collection_not_found(&self.params.name));
        }
        Ok(guard)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, CollectionState>> {
        let guard = self.state.try_write_for(self.lock_timeout).ok_or_else(|| {
            Error::Timeout(format!(
                "write lock on collection '{}' not acquired within {:?}",
                self.params.name, self.lock_timeout
            ))
        })?;
        if self.is_dropped() {
            return Err(Error::collection_not_found(&self.params.name));
        }
        Ok(guard)
    }

    /// Fixed dimension, `None` until the first insert
    pub fn dimension(&self) -> Result<Option<usize>> {
        Ok(self.read_state()?.dimension)
    }

    /// Number of records
    pub fn count(&self) -> Result<usize> {
        Ok(self.read_state()?.records.len())
    }

    /// Summary of the collection
    pub fn info(&self) -> Result<CollectionInfo> {
        let state = self.read_state()?;
        Ok(CollectionInfo {
            id: self.params.id,
            name: self.params.name.clone(),
            dimension: state.dimension,
            metric: self.params.metric,
            count: state.records.len(),
            created_at: self.params.created_at,
            metadata: self.params.metadata.clone(),
        })
    }

    /// Insert or replace a single record
    pub fn upsert(&self, record: Record) -> Result<()> {
        self.upsert_batch(vec![record])
    }

    /// Insert or replace records, all-or-nothing
    ///
    /// Every record is validated before any is applied. When the dimension
    /// is not fixed yet, the batch must agree on one dimension, which is then
    /// frozen.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty/oversized id or an empty/non-finite vector
    /// - `DimensionMismatch` if a vector length differs from the dimension
    /// - `NotFound` if the collection was dropped
    pub fn upsert_batch(&self, records: Vec<Record>) -> Result<()> {
        for record in &records {
            validate_record_id(&record.id)?;
            validate_vector(&record.vector)?;
        }

        let mut state = self.write_state()?;
        state.check_batch_dimension(&records)?;
        if records.is_empty() {
            return Ok(());
        }

        if self.wal.is_some() {
            append_to_wal(
                self.wal.as_deref(),
                &WalEntry::Upsert {
                    collection: self.params.name.clone(),
                    records: records.clone(),
                },
            )?;
        }

        debug!(collection = %self.params.name, records = records.len(), "Upsert");
        state.apply_upsert(records);
        Ok(())
    }

    /// Remove records by id, returning how many were removed
    ///
    /// With `strict`, the call fails with `NotFound` (and removes nothing)
    /// if any id is absent. Otherwise absent ids are skipped.
    pub fn delete_batch(&self, ids: &[String], strict: bool) -> Result<usize> {
        for id in ids {
            validate_record_id(id)?;
        }

        let mut state = self.write_state()?;

        let mut seen = FxHashSet::default();
        let mut present = Vec::new();
        for id in ids {
            if state.ids.contains_key(id) {
                if seen.insert(id.as_str()) {
                    present.push(id.clone());
                }
            } else if strict {
                return Err(Error::record_not_found(&self.params.name, id));
            }
        }

        if present.is_empty() {
            return Ok(0);
        }

        append_to_wal(
            self.wal.as_deref(),
            &WalEntry::DeleteRecords {
                collection: self.params.name.clone(),
                ids: present.clone(),
            },
        )?;

        debug!(collection = %self.params.name, records = present.len(), "Delete records");
        Ok(state.apply_delete(&present))
    }

    /// Remove a single record
    pub fn delete(&self, id: &str, strict: bool) -> Result<bool> {
        Ok(self.delete_batch(&[id.to_string()], strict)? == 1)
    }

    /// Fetch records by id, in request order; absent ids are skipped
    pub fn get(&self, ids: &[String]) -> Result<Vec<Record>> {
        let state = self.read_state()?;
        Ok(ids.iter().filter_map(|id| state.record(id)).collect())
    }

    /// Find the `k` records most similar to `query`
    ///
    /// `filter` restricts candidates before ranking. A collection that has
    /// never received a record (no dimension yet) yields no results.
    ///
    /// # Errors
    /// - `InvalidArgument` for `k == 0` or an empty/non-finite query
    /// - `DimensionMismatch` if the query length differs from the dimension
    /// - `Unavailable` if `cancel` fires mid-scan
    pub fn query(
        &self,
        query: &[f32],
        k: usize,
        filter: Option<&MetadataFilter>,
        cancel: &CancellationToken,
    ) -> Result<Vec<VectorMatch>> {
        validate_k(k)?;
        validate_vector(query)?;

        let state = self.read_state()?;
        let Some(dimension) = state.dimension else {
            return Ok(Vec::new());
        };
        if query.len() != dimension {
            return Err(Error::DimensionMismatch {
                expected: dimension,
                actual: query.len(),
            });
        }

        let filter = filter.filter(|f| !f.is_empty());
        let records = &state.records;
        let accept = |seq: RecordSeq| match filter {
            None => true,
            Some(f) => records
                .get(&seq)
                .map_or(false, |r| f.matches(r.metadata.as_ref())),
        };

        let hits = state.index.search(query, k, &accept, cancel)?;
        Ok(hits
            .into_iter()
            .filter_map(|(seq, score)| {
                records.get(&seq).map(|r| VectorMatch {
                    id: r.id.clone(),
                    score,
                    metadata: r.metadata.clone(),
                    document: r.document.clone(),
                })
            })
            .collect())
    }

    /// Drop the collection under its write lock.
    ///
    /// `on_locked` runs while the write lock is held and before the
    /// collection is marked dropped; if it fails nothing changes.
    pub(crate) fn drop_with(&self, on_locked: impl FnOnce() -> Result<()>) -> Result<()> {
        let mut state = self.write_state()?;
        on_locked()?;
        self.dropped.store(true, Ordering::Release);
        state.clear();
        Ok(())
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    pub(crate) fn replay_upsert(&self, records: Vec<Record>) -> Result<()> {
        let mut state = self.state.write();
        state.check_batch_dimension(&records).map_err(|e| {
            Error::Internal(format!(
                "WAL upsert into '{}' does not replay: {}",
                self.params.name, e
            ))
        })?;
        state.apply_upsert(records);
        Ok(())
    }

    pub(crate) fn replay_delete(&self, ids: &[String]) {
        self.state.write().apply_delete(ids);
    }

    pub(crate) fn replay_drop(&self) {
        let mut state = self.state.write();
        self.dropped.store(true, Ordering::Release);
        state.clear();
    }
}
