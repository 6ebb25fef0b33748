//! In-memory data service (default, thread-safe, async).
//!
//! Each [`InMemoryDataService`] is a typed façade over a [`SharedStore`].
//! Façades for different kinds can share one store; see
//! [`InMemoryDataService::for_kind`].

use super::DataService;
use crate::entity::{Entity, Id};
use crate::error::{Error, Result};
use crate::key::RecordKey;
use crate::observability::{NoOpMetrics, ServiceMetrics};
use crate::store::{RecordStore, SharedStore};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

/// Thread-safe in-memory data service for one entity kind.
///
/// Cloning is cheap and yields a handle to the same store.
///
/// # Example
///
/// ```no_run
/// use data_kit::models::{Customer, Product};
/// use data_kit::{DataService, InMemoryDataService};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let customers = InMemoryDataService::<Customer>::new();
///     let products = customers.for_kind::<Product>();
///
///     let amy = customers.add(Customer::new("Amy", "amy@seznam.cz")).await?;
///     let cap = products.add(Product::new("Cap", "Baseball cap", 1.0)).await?;
///
///     // Identifiers are scoped per kind
///     assert_eq!(amy.id, 1);
///     assert_eq!(cap.id, 1);
///     Ok(())
/// }
/// ```
pub struct InMemoryDataService<T: Entity> {
    store: SharedStore,
    metrics: Arc<dyn ServiceMetrics>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Entity> InMemoryDataService<T> {
    /// Create a service over a new, empty store.
    pub fn new() -> Self {
        Self::with_store(SharedStore::new())
    }

    /// Create a service over an existing store.
    pub fn with_store(store: SharedStore) -> Self {
        InMemoryDataService {
            store,
            metrics: Arc::new(NoOpMetrics),
            _kind: PhantomData,
        }
    }

    /// Create a service over a new store seeded with `records`.
    ///
    /// Records keep the identifiers they carry.
    ///
    /// # Errors
    /// - `Error::InvalidIdentifier` if a record has id `0`
    /// - `Error::DuplicateIdentifier` if two records share an id
    /// - `Error::ValidationError` if a record fails validation
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut store = RecordStore::new();
        let inserted = store.seed(records.into_iter().collect())?;
        debug!("✓ InMemory SEED {} x{}", T::kind(), inserted);
        Ok(Self::with_store(SharedStore::from(store)))
    }

    /// Set custom metrics handler.
    pub fn with_metrics(mut self, metrics: Arc<dyn ServiceMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Façade for another entity kind over the same store and metrics.
    pub fn for_kind<U: Entity>(&self) -> InMemoryDataService<U> {
        InMemoryDataService {
            store: self.store.clone(),
            metrics: Arc::clone(&self.metrics),
            _kind: PhantomData,
        }
    }

    /// The store behind this service.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Insert records with explicit identifiers into the existing store.
    ///
    /// All-or-nothing; see [`RecordStore::seed`].
    ///
    /// # Errors
    /// Same as [`InMemoryDataService::with_records`], also reporting
    /// collisions with records already stored.
    pub async fn seed(&self, records: impl IntoIterator<Item = T>) -> Result<usize> {
        let records: Vec<T> = records.into_iter().collect();
        let result = self.store.lock().await.seed(records);
        match result {
            Ok(inserted) => {
                debug!("✓ InMemory SEED {} x{}", T::kind(), inserted);
                Ok(inserted)
            }
            Err(e) => {
                let id = match &e {
                    Error::DuplicateIdentifier { id, .. }
                    | Error::InvalidIdentifier { id, .. } => *id,
                    _ => 0,
                };
                Err(self.reject(RecordKey::of::<T>(id), e))
            }
        }
    }

    fn reject(&self, key: RecordKey, error: Error) -> Error {
        self.metrics.record_error(&key, &error.to_string());
        warn!("✗ InMemory {} rejected: {}", key, error);
        error
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Clone for InMemoryDataService<T> {
    fn clone(&self) -> Self {
        self.for_kind::<T>()
    }
}

impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn add(&self, record: T) -> Result<T> {
        let timer = Instant::now();
        let supplied = RecordKey::for_record(&record);

        if supplied.id != 0 {
            return Err(self.reject(
                supplied,
                Error::UnexpectedIdentifier {
                    kind: T::kind(),
                    id: supplied.id,
                },
            ));
        }
        if let Err(e) = record.validate() {
            return Err(self.reject(supplied, e));
        }

        // Computing the next id and inserting must share one critical section
        let result = self.store.lock().await.insert_new(record);

        match result {
            Ok(stored) => {
                let key = RecordKey::for_record(&stored);
                self.metrics.record_add(&key, timer.elapsed());
                debug!("✓ InMemory ADD {}", key);
                Ok(stored)
            }
            Err(e) => Err(self.reject(supplied, e)),
        }
    }

    async fn get_all(&self) -> Result<Vec<T>> {
        let timer = Instant::now();
        let records = self.store.lock().await.filter_by_kind::<T>();

        let key = RecordKey::of::<T>(0);
        if records.is_empty() {
            self.metrics.record_miss(&key, timer.elapsed());
        } else {
            self.metrics.record_hit(&key, timer.elapsed());
        }
        debug!("✓ InMemory GET_ALL {} -> {} records", T::kind(), records.len());
        Ok(records)
    }

    async fn get_by_id(&self, id: Id) -> Result<Option<T>> {
        let timer = Instant::now();
        let record = self.store.lock().await.find_by_id::<T>(id).cloned();

        let key = RecordKey::of::<T>(id);
        if record.is_some() {
            self.metrics.record_hit(&key, timer.elapsed());
            debug!("✓ InMemory GET {} -> HIT", key);
        } else {
            self.metrics.record_miss(&key, timer.elapsed());
            debug!("✓ InMemory GET {} -> MISS", key);
        }
        Ok(record)
    }

    async fn update(&self, record: T) -> Result<Option<T>> {
        let timer = Instant::now();
        let key = RecordKey::for_record(&record);

        if let Err(e) = record.validate() {
            return Err(self.reject(key, e));
        }

        let previous = self.store.lock().await.replace(record.clone());

        if previous.is_some() {
            self.metrics.record_update(&key, timer.elapsed());
            debug!("✓ InMemory UPDATE {}", key);
            Ok(Some(record))
        } else {
            self.metrics.record_miss(&key, timer.elapsed());
            debug!("✓ InMemory UPDATE {} -> MISS", key);
            Ok(None)
        }
    }

    async fn delete(&self, id: Id) -> Result<Option<T>> {
        let timer = Instant::now();
        let removed = self.store.lock().await.remove::<T>(id);

        let key = RecordKey::of::<T>(id);
        if removed.is_some() {
            self.metrics.record_delete(&key, timer.elapsed());
            debug!("✓ InMemory DELETE {}", key);
        } else {
            self.metrics.record_miss(&key, timer.elapsed());
            debug!("✓ InMemory DELETE {} -> MISS", key);
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.store.lock().await.count::<T>())
    }
}
