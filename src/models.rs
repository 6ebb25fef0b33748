//! Record kinds served by the data services.

use crate::entity::{Entity, Id};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer entity
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: Id,
    pub name: String,
    pub email: String,
}

impl Customer {
    /// New, not yet stored customer.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Customer {
            id: 0,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Entity for Customer {
    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn kind() -> &'static str {
        "customer"
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::ValidationError("customer name is required".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(Error::ValidationError("customer email is required".to_string()));
        }
        Ok(())
    }
}

/// Product entity
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub price: f32,
}

impl Product {
    /// New, not yet stored product.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f32) -> Self {
        Product {
            id: 0,
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

impl Entity for Product {
    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn kind() -> &'static str {
        "product"
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::ValidationError("product name is required".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::ValidationError(format!(
                "product price must be a non-negative number, got {}",
                self.price
            )));
        }
        Ok(())
    }
}

/// Book entity
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: Id,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: i32,
    pub isbn: Option<String>,
    /// Library user currently holding the book
    pub borrowed_by_user_id: Option<Id>,
}

impl Entity for Book {
    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn kind() -> &'static str {
        "book"
    }
}

/// Library user entity
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibraryUser {
    pub id: Id,
    pub name: Option<String>,
    pub email: Option<String>,
    pub date_joined: DateTime<Utc>,
    /// Identifiers of the books the user holds
    pub borrowed_books: Vec<Id>,
}

impl Entity for LibraryUser {
    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn kind() -> &'static str {
        "library-user"
    }
}
