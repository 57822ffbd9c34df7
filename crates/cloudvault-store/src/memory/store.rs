//! Insertion-ordered record store guarded by a single async lock.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::traits::{BulkMutation, Mutation, Predicate, Record, Repository};

/// Records keyed by an insertion sequence number, plus an id index.
#[derive(Debug)]
struct Inner<R: Record> {
    records: BTreeMap<u64, R>,
    index: HashMap<R::Id, u64>,
    next_seq: u64,
}

impl<R: Record> Inner<R> {
    fn empty() -> Self {
        Self {
            records: BTreeMap::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }

    fn push(&mut self, record: R) -> bool {
        let id = record.id();
        if self.index.contains_key(&id) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(id, seq);
        self.records.insert(seq, record);
        true
    }

    fn get_mut(&mut self, id: &R::Id) -> Option<&mut R> {
        let seq = self.index.get(id)?;
        self.records.get_mut(seq)
    }

    fn take(&mut self, id: &R::Id) -> Option<R> {
        let seq = self.index.remove(id)?;
        self.records.remove(&seq)
    }

    /// Replace the contents with `records`, keeping the sequence number of
    /// every id already present.
    fn replace(&mut self, records: Vec<R>) {
        let old_index = std::mem::take(&mut self.index);
        self.records.clear();
        for record in records {
            let id = record.id();
            if self.index.contains_key(&id) {
                continue;
            }
            let seq = match old_index.get(&id) {
                Some(seq) => *seq,
                None => {
                    let seq = self.next_seq;
                    self.next_seq += 1;
                    seq
                }
            };
            self.index.insert(id, seq);
            self.records.insert(seq, record);
        }
    }
}

/// Owned, exclusively mutated collection of one record type.
///
/// Reads return copies in insertion order. Every mutation runs inside one
/// write-lock critical section, so two concurrent updates of the same
/// store cannot overwrite each other.
#[derive(Debug)]
pub struct MemoryStore<R: Record> {
    /// Label used in log output (`files`, `folders`, ...).
    name: &'static str,
    /// The live records.
    inner: RwLock<Inner<R>>,
    /// What [`Repository::reset`] restores.
    seed: Vec<R>,
}

impl<R: Record> MemoryStore<R> {
    /// Create a store holding `seed`. Records repeating an earlier id are
    /// dropped.
    pub fn seeded(name: &'static str, seed: Vec<R>) -> Self {
        let inner = Self::load(name, &seed);
        Self {
            name,
            inner: RwLock::new(inner),
            seed,
        }
    }

    /// Create an empty store.
    pub fn empty(name: &'static str) -> Self {
        Self::seeded(name, Vec::new())
    }

    fn load(name: &'static str, seed: &[R]) -> Inner<R> {
        let mut inner = Inner::empty();
        for record in seed {
            if !inner.push(record.clone()) {
                warn!(store = name, id = %record.id(), "Duplicate id in seed data, skipping");
            }
        }
        inner
    }
}

#[async_trait]
impl<R: Record> Repository<R> for MemoryStore<R> {
    async fn list(&self) -> Vec<R> {
        self.inner.read().await.records.values().cloned().collect()
    }

    async fn find_by_id(&self, id: &R::Id) -> Option<R> {
        let inner = self.inner.read().await;
        inner
            .index
            .get(id)
            .and_then(|seq| inner.records.get(seq))
            .cloned()
    }

    async fn find_where(&self, predicate: Predicate<'_, R>) -> Vec<R> {
        self.inner
            .read()
            .await
            .records
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    async fn insert(&self, entity: R) -> AppResult<R> {
        let id = entity.id();
        let mut inner = self.inner.write().await;
        if !inner.push(entity.clone()) {
            return Err(AppError::conflict(format!(
                "Record {id} already exists in {}",
                self.name
            )));
        }
        debug!(store = self.name, %id, "Record inserted");
        Ok(entity)
    }

    async fn modify(&self, id: &R::Id, mutate: Mutation<R>) -> Option<R> {
        let mut inner = self.inner.write().await;
        let record = inner.get_mut(id)?;
        mutate(record);
        debug!(store = self.name, %id, "Record modified");
        Some(record.clone())
    }

    async fn modify_all<T>(&self, mutate: BulkMutation<R, T>) -> AppResult<T>
    where
        T: Send + 'static,
    {
        let mut inner = self.inner.write().await;
        let mut working: Vec<R> = inner.records.values().cloned().collect();
        let output = mutate(&mut working)?;
        inner.replace(working);
        debug!(store = self.name, count = inner.records.len(), "Records rewritten");
        Ok(output)
    }

    async fn remove(&self, id: &R::Id) -> Option<R> {
        let removed = self.inner.write().await.take(id);
        if removed.is_some() {
            debug!(store = self.name, %id, "Record removed");
        }
        removed
    }

    async fn remove_where(&self, predicate: Predicate<'_, R>) -> Vec<R> {
        let mut inner = self.inner.write().await;
        let doomed: Vec<R::Id> = inner
            .records
            .values()
            .filter(|record| predicate(record))
            .map(Record::id)
            .collect();
        let removed: Vec<R> = doomed.iter().filter_map(|id| inner.take(id)).collect();
        debug!(store = self.name, count = removed.len(), "Records removed");
        removed
    }

    async fn count(&self) -> usize {
        self.inner.read().await.records.len()
    }

    async fn reset(&self) {
        let fresh = Self::load(self.name, &self.seed);
        *self.inner.write().await = fresh;
        debug!(store = self.name, count = self.seed.len(), "Store reset to seed");
    }
}
