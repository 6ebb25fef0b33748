//! Mocked data service: an in-memory service pre-populated with generated
//! records.

use super::{DataService, InMemoryDataService};
use crate::entity::{Entity, Id};
use crate::error::Result;
use crate::fixture::{Fixture, FixtureGenerator, MockConfig};
use crate::observability::ServiceMetrics;
use crate::store::{RecordStore, SharedStore};
use std::sync::Arc;

/// In-memory data service whose store starts out filled with fixtures.
///
/// After construction it behaves exactly like [`InMemoryDataService`]; all
/// operations are delegated to it.
///
/// # Example
///
/// ```no_run
/// use data_kit::fixture::MockConfig;
/// use data_kit::models::Product;
/// use data_kit::{DataService, MockedDataService};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = MockConfig::default().with_count(5).with_price_range(10.0, 99.0);
///     let products = MockedDataService::<Product>::with_config(&config)?;
///
///     assert_eq!(products.get_all().await?.len(), 5);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct MockedDataService<T: Entity> {
    inner: InMemoryDataService<T>,
}

impl<T: Fixture> MockedDataService<T> {
    /// Create a service seeded with the kind's default number of fixtures.
    ///
    /// # Errors
    /// Returns `Err` if the default generator fails
    pub fn new() -> Result<Self> {
        Self::with_config(&MockConfig::default())
    }

    /// Create a service seeded according to `config`.
    ///
    /// # Errors
    /// - `Error::ConfigError` if `config` is invalid or asks for more records
    ///   than the generator can produce
    pub fn with_config(config: &MockConfig) -> Result<Self> {
        let mut generator = T::generator(config)?;
        Self::with_generator(&mut generator, config.count.unwrap_or(T::DEFAULT_COUNT))
    }
}

impl<T: Entity> MockedDataService<T> {
    /// Create a service seeded with `count` records from `generator`.
    ///
    /// Identifiers `1..=count` are assigned in generation order.
    ///
    /// # Errors
    /// Returns `Err` if generation fails or a generated record is invalid
    pub fn with_generator<G>(generator: &mut G, count: usize) -> Result<Self>
    where
        G: FixtureGenerator<T> + ?Sized,
    {
        let mut store = RecordStore::new();
        for record in generator.generate(count)? {
            record.validate()?;
            store.insert_new(record)?;
        }

        info!("✓ Mocked store seeded with {} {} records", count, T::kind());
        Ok(MockedDataService {
            inner: InMemoryDataService::with_store(SharedStore::from(store)),
        })
    }

    /// Set custom metrics handler.
    pub fn with_metrics(self, metrics: Arc<dyn ServiceMetrics>) -> Self {
        MockedDataService {
            inner: self.inner.with_metrics(metrics),
        }
    }

    /// The in-memory service doing the work.
    pub fn inner(&self) -> &InMemoryDataService<T> {
        &self.inner
    }

    /// Unwrap into the in-memory service.
    pub fn into_inner(self) -> InMemoryDataService<T> {
        self.inner
    }
}

impl<T: Entity> DataService<T> for MockedDataService<T> {
    async fn add(&self, record: T) -> Result<T> {
        self.inner.add(record).await
    }

    async fn get_all(&self) -> Result<Vec<T>> {
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: Id) -> Result<Option<T>> {
        self.inner.get_by_id(id).await
    }

    async fn update(&self, record: T) -> Result<Option<T>> {
        self.inner.update(record).await
    }

    async fn delete(&self, id: Id) -> Result<Option<T>> {
        self.inner.delete(id).await
    }

    async fn count(&self) -> Result<usize> {
        self.inner.count().await
    }
}
