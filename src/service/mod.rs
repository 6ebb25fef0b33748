//! Data service implementations.

use crate::entity::{Entity, Id};
use crate::error::Result;

pub mod inmemory;
pub mod mocked;

pub use inmemory::InMemoryDataService;
pub use mocked::MockedDataService;

/// Per-kind CRUD façade.
///
/// Request handlers depend on this trait, typed to the one entity kind they
/// serve, and never see the store behind it.
///
/// **IMPORTANT:** All methods use `&self` instead of `&mut self` so one
/// service instance can be shared by concurrent handlers. Implementations
/// synchronize internally, and each call is atomic with respect to every
/// other call on the same store.
///
/// A missing record is `Ok(None)`, never an error.
#[allow(async_fn_in_trait)]
pub trait DataService<T: Entity>: Send + Sync {
    /// Store a new record and return it with its assigned identifier.
    ///
    /// The record must not carry an identifier (`id() == 0`); the service
    /// assigns `max_id + 1` for the kind.
    ///
    /// # Errors
    /// - `Error::UnexpectedIdentifier` if the record already has an id
    /// - `Error::ValidationError` if `Entity::validate()` fails
    async fn add(&self, record: T) -> Result<T>;

    /// Every record of this kind, in insertion order. Empty, never absent.
    ///
    /// # Errors
    /// Returns `Err` only if the implementation's storage fails
    async fn get_all(&self) -> Result<Vec<T>>;

    /// Record with identifier `id`, if any.
    ///
    /// # Errors
    /// Returns `Err` only if the implementation's storage fails
    async fn get_by_id(&self, id: Id) -> Result<Option<T>>;

    /// Replace the stored record that has `record.id()`.
    ///
    /// # Returns
    /// - `Ok(Some(record))` - Record replaced, identifier unchanged
    /// - `Ok(None)` - No record with that identifier; nothing changed
    ///
    /// # Errors
    /// Returns `Err` if `Entity::validate()` fails
    async fn update(&self, record: T) -> Result<Option<T>>;

    /// Remove and return the record with identifier `id`.
    ///
    /// `Ok(None)` and no change if it does not exist.
    ///
    /// # Errors
    /// Returns `Err` only if the implementation's storage fails
    async fn delete(&self, id: Id) -> Result<Option<T>>;

    /// Count records of this kind.
    ///
    /// Default implementation counts `get_all()`.
    ///
    /// # Errors
    /// Returns `Err` if `get_all()` fails
    async fn count(&self) -> Result<usize> {
        Ok(self.get_all().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    async fn count_through_trait<S: DataService<Customer>>(service: &S) -> usize {
        service.count().await.expect("Failed to count")
    }

    #[tokio::test]
    async fn test_service_count_default() {
        let service = InMemoryDataService::<Customer>::new();
        service
            .add(Customer::new("Amy", "a@x.cz"))
            .await
            .expect("Failed to add");

        assert_eq!(count_through_trait(&service).await, 1);
    }
}
