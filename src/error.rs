//! Error types for the data services.

use crate::entity::Id;
use std::fmt;

/// Result type for data service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for data services.
///
/// A missing record is never an error: lookups, updates and deletes return
/// `Ok(None)` when nothing matches. The variants below describe requests the
/// store refuses to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// `add` was called with a record that already carries an identifier.
    ///
    /// Identifiers are always assigned by the service. Callers must pass
    /// records with an identifier of `0`.
    UnexpectedIdentifier {
        /// Entity kind (e.g. "customer")
        kind: &'static str,
        /// Identifier supplied by the caller
        id: Id,
    },

    /// A record of the same kind with the same identifier is already stored.
    ///
    /// Raised when seeding a store with explicit identifiers.
    DuplicateIdentifier {
        /// Entity kind (e.g. "customer")
        kind: &'static str,
        /// Colliding identifier
        id: Id,
    },

    /// A record was seeded without an identifier.
    ///
    /// Seeded records keep the identifier they carry, so `0` is refused.
    InvalidIdentifier {
        /// Entity kind (e.g. "customer")
        kind: &'static str,
        /// Offending identifier
        id: Id,
    },

    /// `Entity::validate()` rejected a record on add, update or seed.
    ValidationError(String),

    /// A book cannot be lent because another user already holds it.
    AlreadyBorrowed {
        /// Book identifier
        book_id: Id,
        /// Identifier of the user currently holding the book
        user_id: Id,
    },

    /// Configuration error while building a service or fixture generator.
    ///
    /// Common causes:
    /// - Minimum price above maximum price
    /// - More unique products requested than base names available
    ConfigError(String),

    /// Generic error with custom message.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedIdentifier { kind, id } => write!(
                f,
                "Unexpected identifier: {}:{} was supplied by the caller, identifiers are assigned by the service",
                kind, id
            ),
            Error::DuplicateIdentifier { kind, id } => {
                write!(f, "Duplicate identifier: {}:{} already exists", kind, id)
            }
            Error::InvalidIdentifier { kind, id } => {
                write!(f, "Invalid identifier: {}:{}", kind, id)
            }
            Error::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Error::AlreadyBorrowed { book_id, user_id } => write!(
                f,
                "Book {} is already borrowed by user {}",
                book_id, user_id
            ),
            Error::ConfigError(msg) => write!(f, "Config error: {}", msg),
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error {
    fn from(e: String) -> Self {
        Error::Other(e)
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Error::Other(e.to_string())
    }
}
