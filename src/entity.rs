//! Core entity trait that every stored record kind must implement.

use crate::error::Result;

/// Integer identifier of a record, unique within one entity kind.
///
/// `0` means "not assigned yet".
pub type Id = u32;

/// Trait that all records held by a data service must implement.
///
/// This is the identity capability: the store reads and writes a record's
/// identifier through it, so a kind without an identifier simply cannot be
/// stored.
///
/// # Example
///
/// ```
/// use data_kit::entity::{Entity, Id};
///
/// #[derive(Clone, Debug)]
/// pub struct Invoice {
///     pub id: Id,
///     pub number: String,
/// }
///
/// impl Entity for Invoice {
///     fn id(&self) -> Id {
///         self.id
///     }
///
///     fn set_id(&mut self, id: Id) {
///         self.id = id;
///     }
///
///     fn kind() -> &'static str {
///         "invoice"
///     }
/// }
///
/// let mut invoice = Invoice { id: 0, number: "2024-001".to_string() };
/// invoice.set_id(7);
/// assert_eq!(invoice.id(), 7);
/// ```
pub trait Entity: Clone + Send + Sync + 'static {
    /// Return the record's identifier.
    fn id(&self) -> Id;

    /// Overwrite the record's identifier.
    ///
    /// After `set_id(v)`, `id()` returns `v`.
    fn set_id(&mut self, id: Id);

    /// Return the name of this entity kind.
    ///
    /// Used in record keys, log lines, errors and store statistics.
    /// Example: "customer", "product"
    ///
    /// Must be unique per type within one store; a store refuses records of
    /// a second type that reuses a kind name.
    fn kind() -> &'static str;

    /// Optional: Validate the record before it is stored.
    ///
    /// Called by `add`, `update` and when seeding a store.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
