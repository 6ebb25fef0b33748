//! Record store shared by every per-kind data service.
//!
//! One [`RecordStore`] holds records of any number of entity kinds in a
//! single ordered list; each element keeps its concrete type. Identifiers are
//! unique within a kind only, so `customer:1` and `product:1` coexist.
//!
//! The typed scanner methods (`filter_by_kind`, `max_id`, `find_by_id`, ...)
//! select elements by their concrete Rust type, never by field names.
//!
//! [`SharedStore`] wraps the store in one async mutex. Every service
//! operation runs inside a single critical section of that mutex, which
//! makes it atomic with respect to every other operation on the store, for
//! all kinds.
//!
//! Outside the crate the store can only be built through [`RecordStore::seed`]
//! and read through [`SharedStore::stats`]; all other writes go through the
//! data services.

use crate::entity::{Entity, Id};
use crate::error::{Error, Result};
use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// One element of the store.
///
/// `kind` and `id` are copied out of the record on insert so scans never
/// need to downcast non-matching elements.
struct StoredRecord {
    kind: TypeId,
    kind_name: &'static str,
    id: Id,
    record: Box<dyn Any + Send + Sync>,
}

impl StoredRecord {
    fn new<T: Entity>(record: T) -> Self {
        StoredRecord {
            kind: TypeId::of::<T>(),
            kind_name: T::kind(),
            id: record.id(),
            record: Box::new(record),
        }
    }

    fn is<T: Entity>(&self) -> bool {
        self.kind == TypeId::of::<T>()
    }

    fn matches<T: Entity>(&self, id: Id) -> bool {
        self.is::<T>() && self.id == id
    }

    fn get<T: Entity>(&self) -> Option<&T> {
        self.record.downcast_ref::<T>()
    }

    fn into_record<T: Entity>(self) -> Option<T> {
        self.record.downcast::<T>().ok().map(|boxed| *boxed)
    }
}

/// Ordered, heterogeneous record collection.
///
/// Not synchronized by itself; share it through [`SharedStore`].
#[derive(Default)]
pub struct RecordStore {
    records: Vec<StoredRecord>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
        }
    }

    /// Total number of records, all kinds included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store holds no record of any kind.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record of kind `T`, in store order.
    pub fn filter_by_kind<T: Entity>(&self) -> Vec<T> {
        self.records
            .iter()
            .filter(|r| r.is::<T>())
            .filter_map(|r| r.get::<T>())
            .cloned()
            .collect()
    }

    /// Number of records of kind `T`.
    pub fn count<T: Entity>(&self) -> usize {
        self.records.iter().filter(|r| r.is::<T>()).count()
    }

    /// Greatest identifier in use for kind `T`, or `0` if there is none.
    pub fn max_id<T: Entity>(&self) -> Id {
        self.records
            .iter()
            .filter(|r| r.is::<T>())
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
    }

    /// Identifier the next new record of kind `T` receives.
    ///
    /// This is `max_id() + 1`, so the identifier of a deleted record is only
    /// handed out again if it was the greatest one.
    pub fn next_id<T: Entity>(&self) -> Result<Id> {
        self.max_id::<T>().checked_add(1).ok_or_else(|| {
            Error::Other(format!("identifier space exhausted for {}", T::kind()))
        })
    }

    /// First record of kind `T` with identifier `id`, in store order.
    pub fn find_by_id<T: Entity>(&self, id: Id) -> Option<&T> {
        self.records
            .iter()
            .find(|r| r.matches::<T>(id))
            .and_then(|r| r.get::<T>())
    }

    /// Check if a record of kind `T` with identifier `id` exists.
    pub fn contains<T: Entity>(&self, id: Id) -> bool {
        self.records.iter().any(|r| r.matches::<T>(id))
    }

    fn position<T: Entity>(&self, id: Id) -> Option<usize> {
        self.records.iter().position(|r| r.matches::<T>(id))
    }

    /// Reject `T` if another Rust type already stores records under the same
    /// kind name.
    fn check_kind_name<T: Entity>(&self) -> Result<()> {
        let taken = self
            .records
            .iter()
            .any(|r| r.kind_name == T::kind() && !r.is::<T>());
        if taken {
            return Err(Error::ConfigError(format!(
                "kind name '{}' is already used by another entity type",
                T::kind()
            )));
        }
        Ok(())
    }

    /// Append a record that already carries its identifier.
    ///
    /// # Errors
    ///
    /// - `Error::ValidationError` if the record fails validation
    /// - `Error::InvalidIdentifier` if the identifier is `0`
    /// - `Error::DuplicateIdentifier` if the kind already uses the identifier
    /// - `Error::ConfigError` if another type uses the same kind name
    pub(crate) fn insert<T: Entity>(&mut self, record: T) -> Result<()> {
        record.validate()?;
        self.check_kind_name::<T>()?;
        let id = record.id();
        if id == 0 {
            return Err(Error::InvalidIdentifier { kind: T::kind(), id });
        }
        if self.contains::<T>(id) {
            return Err(Error::DuplicateIdentifier { kind: T::kind(), id });
        }

        self.records.push(StoredRecord::new(record));
        Ok(())
    }

    /// Assign the next free identifier of kind `T` to `record` and append it.
    ///
    /// Whatever identifier the record carried is overwritten. Returns the
    /// stored record.
    pub(crate) fn insert_new<T: Entity>(&mut self, mut record: T) -> Result<T> {
        self.check_kind_name::<T>()?;
        let id = self.next_id::<T>()?;
        record.set_id(id);
        self.records.push(StoredRecord::new(record.clone()));
        Ok(record)
    }

    /// Insert a batch of records with explicit identifiers.
    ///
    /// All-or-nothing: every record is validated and checked against the
    /// store and against the rest of the batch before anything is inserted.
    /// Returns the number of inserted records.
    pub fn seed<T: Entity>(&mut self, records: Vec<T>) -> Result<usize> {
        self.check_kind_name::<T>()?;
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            let id = record.id();
            if id == 0 {
                return Err(Error::InvalidIdentifier { kind: T::kind(), id });
            }
            if !seen.insert(id) || self.contains::<T>(id) {
                return Err(Error::DuplicateIdentifier { kind: T::kind(), id });
            }
        }

        let inserted = records.len();
        for record in records {
            self.insert(record)?;
        }
        Ok(inserted)
    }

    /// Replace the record of kind `T` that has the same identifier as
    /// `record`, keeping its position in the store.
    ///
    /// Returns the previous record, or `None` (and leaves the store untouched)
    /// if no such record exists.
    pub(crate) fn replace<T: Entity>(&mut self, record: T) -> Option<T> {
        let index = self.position::<T>(record.id())?;
        let previous = std::mem::replace(&mut self.records[index], StoredRecord::new(record));
        previous.into_record::<T>()
    }

    /// Remove and return the record of kind `T` with identifier `id`.
    pub(crate) fn remove<T: Entity>(&mut self, id: Id) -> Option<T> {
        let index = self.position::<T>(id)?;
        self.records.remove(index).into_record::<T>()
    }

    /// Remove every record of every kind.
    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Record counts per kind.
    pub fn stats(&self) -> StoreStats {
        let mut per_kind = BTreeMap::new();
        for record in &self.records {
            *per_kind.entry(record.kind_name).or_insert(0) += 1;
        }

        StoreStats {
            total_records: self.records.len(),
            per_kind,
        }
    }
}

/// Store statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub total_records: usize,
    /// Keyed by [`Entity::kind`], which is unique per type within a store.
    pub per_kind: BTreeMap<&'static str, usize>,
}

/// Cloneable handle to one [`RecordStore`] behind a single async mutex.
///
/// All clones refer to the same store.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<RecordStore>>,
}

impl SharedStore {
    /// Create a handle to a new, empty store.
    pub fn new() -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(RecordStore::new())),
        }
    }

    /// Acquire the store lock.
    ///
    /// Keep the guard for exactly one logical operation; never hold it across
    /// I/O.
    ///
    /// Only the crate's services take the lock:
    ///
    /// ```compile_fail
    /// use data_kit::SharedStore;
    ///
    /// async fn wipe(store: &SharedStore) {
    ///     store.lock().await.clear();
    /// }
    /// ```
    pub(crate) async fn lock(&self) -> MutexGuard<'_, RecordStore> {
        self.inner.lock().await
    }

    /// Check if two handles share the same store.
    pub fn ptr_eq(&self, other: &SharedStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Get store statistics.
    pub async fn stats(&self) -> StoreStats {
        self.lock().await.stats()
    }

    /// Print store statistics to debug log.
    pub async fn log_stats(&self) {
        let stats = self.stats().await;
        debug!(
            "Store Stats: {} records {:?}",
            stats.total_records, stats.per_kind
        );
    }

    /// Remove every record of every kind.
    pub async fn clear_all(&self) {
        self.lock().await.clear();
        warn!("⚠ Store CLEAR_ALL executed - all records removed!");
    }
}

impl From<RecordStore> for SharedStore {
    fn from(store: RecordStore) -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Apple {
        id: Id,
        variety: String,
    }

    impl Entity for Apple {
        fn id(&self) -> Id {
            self.id
        }

        fn set_id(&mut self, id: Id) {
            self.id = id;
        }

        fn kind() -> &'static str {
            "apple"
        }

        fn validate(&self) -> Result<()> {
            if self.variety.is_empty() {
                return Err(Error::ValidationError("variety is required".to_string()));
            }
            Ok(())
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Pear {
        id: Id,
    }

    impl Entity for Pear {
        fn id(&self) -> Id {
            self.id
        }

        fn set_id(&mut self, id: Id) {
            self.id = id;
        }

        fn kind() -> &'static str {
            "pear"
        }
    }

    /// Different type, same kind name as `Pear`.
    #[derive(Clone, Debug, PartialEq)]
    struct ImpostorPear {
        id: Id,
    }

    impl Entity for ImpostorPear {
        fn id(&self) -> Id {
            self.id
        }

        fn set_id(&mut self, id: Id) {
            self.id = id;
        }

        fn kind() -> &'static str {
            "pear"
        }
    }

    fn apple(id: Id, variety: &str) -> Apple {
        Apple {
            id,
            variety: variety.to_string(),
        }
    }

    fn mixed_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.insert(apple(1, "gala")).expect("Failed to insert");
        store.insert(Pear { id: 1 }).expect("Failed to insert");
        store.insert(apple(5, "fuji")).expect("Failed to insert");
        store.insert(Pear { id: 2 }).expect("Failed to insert");
        store
    }

    #[test]
    fn test_filter_by_kind_keeps_store_order() {
        let store = mixed_store();

        let apples = store.filter_by_kind::<Apple>();
        assert_eq!(apples, vec![apple(1, "gala"), apple(5, "fuji")]);

        let pears = store.filter_by_kind::<Pear>();
        assert_eq!(pears, vec![Pear { id: 1 }, Pear { id: 2 }]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_max_id_per_kind() {
        let store = mixed_store();
        assert_eq!(store.max_id::<Apple>(), 5);
        assert_eq!(store.max_id::<Pear>(), 2);
        assert_eq!(RecordStore::new().max_id::<Apple>(), 0);
        assert_eq!(store.next_id::<Apple>().expect("Failed to get next id"), 6);
    }

    #[test]
    fn test_find_by_id_is_scoped_to_kind() {
        let store = mixed_store();

        assert_eq!(store.find_by_id::<Apple>(1), Some(&apple(1, "gala")));
        assert_eq!(store.find_by_id::<Pear>(1), Some(&Pear { id: 1 }));
        assert_eq!(store.find_by_id::<Pear>(5), None);
    }

    #[test]
    fn test_insert_rejects_duplicate_and_zero() {
        let mut store = mixed_store();

        let err = store.insert(apple(5, "braeburn")).unwrap_err();
        assert_eq!(err, Error::DuplicateIdentifier { kind: "apple", id: 5 });

        let err = store.insert(apple(0, "braeburn")).unwrap_err();
        assert_eq!(err, Error::InvalidIdentifier { kind: "apple", id: 0 });

        assert_eq!(store.count::<Apple>(), 2);
    }

    #[test]
    fn test_insert_validates_record() {
        let mut store = mixed_store();

        let err = store.insert(apple(7, "")).unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        assert!(!store.contains::<Apple>(7));
        assert_eq!(store.count::<Apple>(), 2);
    }

    #[test]
    fn test_kind_name_is_unique_per_type() {
        let mut store = mixed_store();

        let err = store.insert(ImpostorPear { id: 9 }).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        let err = store.insert_new(ImpostorPear { id: 0 }).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        let err = store.seed(vec![ImpostorPear { id: 9 }]).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        // Pear counts are not polluted
        assert_eq!(store.stats().per_kind.get("pear"), Some(&2));
        assert_eq!(store.len(), 4);

        // An empty store accepts either type first
        let mut fresh = RecordStore::new();
        fresh
            .insert(ImpostorPear { id: 1 })
            .expect("Failed to insert");
        assert!(fresh.insert(Pear { id: 1 }).is_err());
    }

    #[test]
    fn test_insert_new_overwrites_identifier() {
        let mut store = mixed_store();

        let stored = store
            .insert_new(apple(99, "jonagold"))
            .expect("Failed to insert");
        assert_eq!(stored.id, 6);
        assert!(store.contains::<Apple>(6));
        assert!(!store.contains::<Apple>(99));
    }

    #[test]
    fn test_seed_is_all_or_nothing() {
        let mut store = RecordStore::new();

        let err = store
            .seed(vec![apple(1, "a"), apple(2, "b"), apple(1, "c")])
            .unwrap_err();
        assert_eq!(err, Error::DuplicateIdentifier { kind: "apple", id: 1 });
        assert!(store.is_empty());

        let inserted = store
            .seed(vec![apple(3, "a"), apple(1, "b")])
            .expect("Failed to seed");
        assert_eq!(inserted, 2);
        assert_eq!(store.max_id::<Apple>(), 3);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut store = mixed_store();

        let previous = store.replace(apple(1, "honeycrisp"));
        assert_eq!(previous, Some(apple(1, "gala")));
        assert_eq!(
            store.filter_by_kind::<Apple>(),
            vec![apple(1, "honeycrisp"), apple(5, "fuji")]
        );

        assert_eq!(store.replace(apple(7, "missing")), None);
        assert_eq!(store.count::<Apple>(), 2);
    }

    #[test]
    fn test_remove() {
        let mut store = mixed_store();

        assert_eq!(store.remove::<Pear>(1), Some(Pear { id: 1 }));
        assert_eq!(store.remove::<Pear>(1), None);
        assert_eq!(store.find_by_id::<Apple>(1), Some(&apple(1, "gala")));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_stats() {
        let store = mixed_store();
        let stats = store.stats();

        assert_eq!(stats.total_records, 4);
        assert_eq!(stats.per_kind.get("apple"), Some(&2));
        assert_eq!(stats.per_kind.get("pear"), Some(&2));
    }

    #[tokio::test]
    async fn test_shared_store_clone() {
        let store1 = SharedStore::new();
        let store2 = store1.clone();

        store1
            .lock()
            .await
            .insert(Pear { id: 1 })
            .expect("Failed to insert");

        // Both handles share the same store
        assert!(store1.ptr_eq(&store2));
        assert_eq!(store2.lock().await.count::<Pear>(), 1);

        store2.clear_all().await;
        assert!(store1.lock().await.is_empty());
    }
}
