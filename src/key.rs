//! Record key utilities.

use crate::entity::{Entity, Id};
use std::fmt;

/// Identity of one stored record: its entity kind plus identifier.
///
/// Displayed as `"{kind}:{id}"`, e.g. `customer:3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub kind: &'static str,
    pub id: Id,
}

impl RecordKey {
    /// Build the key of record `id` of kind `T`.
    pub fn of<T: Entity>(id: Id) -> Self {
        RecordKey { kind: T::kind(), id }
    }

    /// Build the key of an existing record.
    pub fn for_record<T: Entity>(record: &T) -> Self {
        Self::of::<T>(record.id())
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
