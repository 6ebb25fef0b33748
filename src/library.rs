//! Book lending on top of a shared store.
//!
//! Books and library users live in the same [`SharedStore`], so lending a
//! book updates both records inside one critical section.

use crate::entity::Id;
use crate::error::{Error, Result};
use crate::fixture::{sample_books, sample_library_users};
use crate::key::RecordKey;
use crate::models::{Book, LibraryUser};
use crate::service::InMemoryDataService;
use crate::store::{RecordStore, SharedStore};

/// Books and library users over one store.
///
/// Plain CRUD goes through [`Library::books`] and [`Library::users`];
/// lending goes through [`Library::borrow_book`] and [`Library::return_book`].
/// Deleting through [`Library::delete_book`] and [`Library::delete_user`]
/// also clears the lending references pointing at the deleted record.
#[derive(Clone)]
pub struct Library {
    books: InMemoryDataService<Book>,
    users: InMemoryDataService<LibraryUser>,
}

impl Library {
    /// Create a library over a new, empty store.
    pub fn new() -> Self {
        Self::with_store(SharedStore::new())
    }

    /// Create a library over an existing store.
    pub fn with_store(store: SharedStore) -> Self {
        let books = InMemoryDataService::with_store(store);
        let users = books.for_kind::<LibraryUser>();
        Library { books, users }
    }

    /// Create a library holding the sample books and users.
    ///
    /// # Errors
    /// Returns `Err` if the samples collide (they do not)
    pub fn with_samples() -> Result<Self> {
        let mut store = RecordStore::new();
        store.seed(sample_books())?;
        store.seed(sample_library_users())?;
        Ok(Self::with_store(SharedStore::from(store)))
    }

    /// Book service.
    pub fn books(&self) -> &InMemoryDataService<Book> {
        &self.books
    }

    /// Library user service.
    pub fn users(&self) -> &InMemoryDataService<LibraryUser> {
        &self.users
    }

    /// Lend book `book_id` to user `user_id`.
    ///
    /// # Returns
    /// - `Ok(Some(book))` - The book, now marked as borrowed by the user
    /// - `Ok(None)` - The book or the user does not exist; nothing changed
    ///
    /// Lending a book to the user who already holds it is a no-op that
    /// returns the book. A book marked as held by a user that no longer
    /// exists counts as not held.
    ///
    /// # Errors
    /// Returns `Error::AlreadyBorrowed` if another existing user holds the book
    pub async fn borrow_book(&self, book_id: Id, user_id: Id) -> Result<Option<Book>> {
        let mut store = self.books.store().lock().await;

        let Some(mut book) = store.find_by_id::<Book>(book_id).cloned() else {
            debug!("✗ BORROW {} -> MISS", RecordKey::of::<Book>(book_id));
            return Ok(None);
        };
        let Some(mut user) = store.find_by_id::<LibraryUser>(user_id).cloned() else {
            debug!("✗ BORROW {} -> MISS", RecordKey::of::<LibraryUser>(user_id));
            return Ok(None);
        };

        match book.borrowed_by_user_id {
            Some(holder) if holder != user_id && store.contains::<LibraryUser>(holder) => {
                let err = Error::AlreadyBorrowed {
                    book_id,
                    user_id: holder,
                };
                warn!("✗ BORROW {} rejected: {}", RecordKey::for_record(&book), err);
                return Err(err);
            }
            _ => {}
        }

        book.borrowed_by_user_id = Some(user_id);
        if !user.borrowed_books.contains(&book_id) {
            user.borrowed_books.push(book_id);
        }

        store.replace(book.clone());
        store.replace(user);

        debug!(
            "✓ BORROW {} -> {}",
            RecordKey::for_record(&book),
            RecordKey::of::<LibraryUser>(user_id)
        );
        Ok(Some(book))
    }

    /// Take book `book_id` back from whoever holds it.
    ///
    /// Returns the book, or `None` if it does not exist. Returning a book
    /// nobody holds is a no-op that returns the book.
    ///
    /// # Errors
    /// Returns `Err` only if the store fails
    pub async fn return_book(&self, book_id: Id) -> Result<Option<Book>> {
        let mut store = self.books.store().lock().await;

        let Some(mut book) = store.find_by_id::<Book>(book_id).cloned() else {
            debug!("✗ RETURN {} -> MISS", RecordKey::of::<Book>(book_id));
            return Ok(None);
        };

        if let Some(holder) = book.borrowed_by_user_id.take() {
            if let Some(mut user) = store.find_by_id::<LibraryUser>(holder).cloned() {
                user.borrowed_books.retain(|id| *id != book_id);
                store.replace(user);
            }
            store.replace(book.clone());
            debug!(
                "✓ RETURN {} <- {}",
                RecordKey::for_record(&book),
                RecordKey::of::<LibraryUser>(holder)
            );
        }

        Ok(Some(book))
    }

    /// Delete book `book_id` and drop it from its holder's borrowed books.
    ///
    /// Returns the deleted book, or `None` if it does not exist.
    ///
    /// # Errors
    /// Returns `Err` only if the store fails
    pub async fn delete_book(&self, book_id: Id) -> Result<Option<Book>> {
        let mut store = self.books.store().lock().await;

        let Some(book) = store.remove::<Book>(book_id) else {
            debug!("✗ DELETE {} -> MISS", RecordKey::of::<Book>(book_id));
            return Ok(None);
        };

        if let Some(holder) = book.borrowed_by_user_id {
            if let Some(mut user) = store.find_by_id::<LibraryUser>(holder).cloned() {
                user.borrowed_books.retain(|id| *id != book_id);
                store.replace(user);
            }
        }

        debug!("✓ DELETE {}", RecordKey::for_record(&book));
        Ok(Some(book))
    }

    /// Delete user `user_id` and release every book they hold.
    ///
    /// Returns the deleted user, or `None` if they do not exist.
    ///
    /// # Errors
    /// Returns `Err` only if the store fails
    pub async fn delete_user(&self, user_id: Id) -> Result<Option<LibraryUser>> {
        let mut store = self.books.store().lock().await;

        let Some(user) = store.remove::<LibraryUser>(user_id) else {
            debug!("✗ DELETE {} -> MISS", RecordKey::of::<LibraryUser>(user_id));
            return Ok(None);
        };

        let held: Vec<Book> = store
            .filter_by_kind::<Book>()
            .into_iter()
            .filter(|book| book.borrowed_by_user_id == Some(user_id))
            .collect();
        for mut book in held {
            book.borrowed_by_user_id = None;
            store.replace(book);
        }

        debug!("✓ DELETE {}", RecordKey::for_record(&user));
        Ok(Some(user))
    }

    /// Books currently held by user `user_id`, in store order.
    ///
    /// # Errors
    /// Returns `Err` only if the store fails
    pub async fn books_borrowed_by(&self, user_id: Id) -> Result<Vec<Book>> {
        let store = self.books.store().lock().await;
        Ok(store
            .filter_by_kind::<Book>()
            .into_iter()
            .filter(|book| book.borrowed_by_user_id == Some(user_id))
            .collect())
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}
