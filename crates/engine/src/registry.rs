//! Collection registry: name -> collection
//!
//! The map sits behind its own `RwLock`, held only for lookup, insert and
//! remove, never across a data operation. Collections on different names
//! never contend with each other.
//!
//! ## Lock order
//!
//! Deleting a collection takes the collection's write lock first and the
//! registry write lock inside it. No other path holds the registry lock while
//! waiting on a collection lock, so the two can never deadlock.

use crate::backend::IndexBackendFactory;
use crate::collection::{append_to_wal, Collection, CollectionHandle, CollectionParams};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use quiver_core::clock::now_micros;
use quiver_core::validation::{validate_collection_name, validate_dimension};
use quiver_core::{CollectionInfo, CollectionOptions, Error, Result};
use quiver_durability::{Wal, WalEntry};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Registry of live collections
pub struct Registry {
    collections: RwLock<FxHashMap<String, CollectionHandle>>,
    next_id: AtomicU64,
    lock_timeout: Duration,
    backend: IndexBackendFactory,
    wal: Option<Arc<Wal>>,
}

impl Registry {
    pub(crate) fn new(
        lock_timeout: Duration,
        backend: IndexBackendFactory,
        wal: Option<Arc<Wal>>,
    ) -> Self {
        Registry {
            collections: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(0),
            lock_timeout,
            backend,
            wal,
        }
    }

    fn read_map(&self) -> Result<RwLockReadGuard<'_, FxHashMap<String, CollectionHandle>>> {
        self.collections
            .try_read_for(self.lock_timeout)
            .ok_or_else(|| {
                Error::Timeout(format!(
                    "registry read lock not acquired within {:?}",
                    self.lock_timeout
                ))
            })
    }

    fn write_map(&self) -> Result<RwLockWriteGuard<'_, FxHashMap<String, CollectionHandle>>> {
        self.collections
            .try_write_for(self.lock_timeout)
            .ok_or_else(|| {
                Error::Timeout(format!(
                    "registry write lock not acquired within {:?}",
                    self.lock_timeout
                ))
            })
    }

    fn new_collection(&self, params: CollectionParams) -> CollectionHandle {
        Arc::new(Collection::new(
            params,
            self.backend,
            self.lock_timeout,
            self.wal.clone(),
        ))
    }

    /// Create a collection
    ///
    /// # Errors
    /// - `AlreadyExists` if a collection with this name exists
    /// - `InvalidArgument` if the name is malformed or the dimension is 0
    pub fn create(&self, name: &str, options: CollectionOptions) -> Result<CollectionHandle> {
        self.create_inner(name, options, false)
    }

    /// Create a collection, or return the existing one with this name
    ///
    /// An existing collection is returned as-is; `options` are not compared.
    pub fn get_or_create(&self, name: &str, options: CollectionOptions) -> Result<CollectionHandle> {
        self.create_inner(name, options, true)
    }

    fn create_inner(
        &self,
        name: &str,
        options: CollectionOptions,
        get_or_create: bool,
    ) -> Result<CollectionHandle> {
        validate_collection_name(name)?;
        if let Some(dimension) = options.dimension {
            validate_dimension(dimension)?;
        }

        let mut map = self.write_map()?;
        if let Some(existing) = map.get(name).filter(|c| !c.is_dropped()) {
            if get_or_create {
                return Ok(existing.clone());
            }
            return Err(Error::AlreadyExists(format!("collection '{}'", name)));
        }

        let metric = options.resolved_metric();
        let created_at = now_micros();
        append_to_wal(
            self.wal.as_deref(),
            &WalEntry::CreateCollection {
                name: name.to_string(),
                dimension: options.dimension,
                metric,
                metadata: options.metadata.clone(),
                created_at,
            },
        )?;

        let handle = self.new_collection(CollectionParams {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            dimension: options.dimension,
            metric,
            created_at,
            metadata: options.metadata,
        });
        map.insert(name.to_string(), handle.clone());

        info!(collection = name, id = handle.id(), %metric, dimension = ?options.dimension, "Created collection");
        Ok(handle)
    }

    /// Look up a collection
    ///
    /// # Errors
    /// - `NotFound` if no collection has this name
    pub fn get(&self, name: &str) -> Result<CollectionHandle> {
        let map = self.read_map()?;
        map.get(name)
            .filter(|c| !c.is_dropped())
            .cloned()
            .ok_or_else(|| Error::collection_not_found(name))
    }

    /// Check if a collection exists
    pub fn exists(&self, name: &str) -> Result<bool> {
        let map = self.read_map()?;
        Ok(map.get(name).map_or(false, |c| !c.is_dropped()))
    }

    /// Delete a collection and all of its records
    ///
    /// # Errors
    /// - `NotFound` if no collection has this name
    pub fn delete(&self, name: &str) -> Result<()> {
        let handle = self.get(name)?;

        handle.drop_with(|| {
            let mut map = self.write_map()?;
            append_to_wal(
                self.wal.as_deref(),
                &WalEntry::DropCollection {
                    name: name.to_string(),
                },
            )?;
            if map.get(name).map_or(false, |c| Arc::ptr_eq(c, &handle)) {
                map.remove(name);
            }
            Ok(())
        })?;

        info!(collection = name, id = handle.id(), "Deleted collection");
        Ok(())
    }

    /// Delete a collection if present, returning whether it was
    ///
    /// Only `NotFound` is absorbed; every other error propagates.
    pub fn delete_if_exists(&self, name: &str) -> Result<bool> {
        match self.delete(name) {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => {
                debug!(collection = name, "Delete skipped, collection absent");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Snapshot of every collection in creation order
    pub fn list(&self) -> Result<Vec<CollectionInfo>> {
        let handles: Vec<CollectionHandle> = self.read_map()?.values().cloned().collect();

        let mut infos = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.info() {
                Ok(info) => infos.push(info),
                // Dropped after the snapshot was taken.
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }
        infos.sort_by_key(|info| info.id);
        Ok(infos)
    }

    /// Number of live collections
    pub fn len(&self) -> Result<usize> {
        Ok(self.read_map()?.values().filter(|c| !c.is_dropped()).count())
    }

    /// Check if there are no collections
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Apply one recovered WAL entry without logging it again
    pub(crate) fn apply(&self, entry: WalEntry) -> Result<()> {
        match entry {
            WalEntry::CreateCollection {
                name,
                dimension,
                metric,
                metadata,
                created_at,
            } => {
                let mut map = self.collections.write();
                if map.get(&name).map_or(false, |c| !c.is_dropped()) {
                    return Err(Error::Internal(format!(
                        "WAL creates collection '{}' twice",
                        name
                    )));
                }
                let handle = self.new_collection(CollectionParams {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    name: name.clone(),
                    dimension,
                    metric,
                    created_at,
                    metadata,
                });
                map.insert(name, handle);
            }
            WalEntry::DropCollection { name } => {
                let removed = self.collections.write().remove(&name);
                match removed {
                    Some(handle) => handle.replay_drop(),
                    None => return Err(replay_missing(&name)),
                }
            }
            WalEntry::Upsert {
                collection,
                records,
            } => {
                self.replay_target(&collection)?.replay_upsert(records)?;
            }
            WalEntry::DeleteRecords { collection, ids } => {
                self.replay_target(&collection)?.replay_delete(&ids);
            }
        }
        Ok(())
    }

    fn replay_target(&self, name: &str) -> Result<CollectionHandle> {
        self.collections
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| replay_missing(name))
    }
}

fn replay_missing(name: &str) -> Error {
    Error::Internal(format!(
        "WAL references collection '{}' which does not exist at that point",
        name
    ))
}
