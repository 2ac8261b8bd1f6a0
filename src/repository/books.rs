//! In-memory book store

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const BOOK_ALREADY_EXISTS: &str = "Book with this ID already exists";

/// Books keyed by id, listed in insertion order.
///
/// Clones share the same map. Every operation is one critical section and
/// records are not re-validated here.
#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<IndexMap<i64, Book>>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, IndexMap<i64, Book>>> {
        self.books
            .read()
            .map_err(|_| AppError::Internal("Book store lock poisoned".into()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, IndexMap<i64, Book>>> {
        self.books
            .write()
            .map_err(|_| AppError::Internal("Book store lock poisoned".into()))
    }

    /// List all books
    pub fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Get book by ID
    pub fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.read()?
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    /// Insert a book under its own id
    pub fn create(&self, book: Book) -> AppResult<Book> {
        let mut books = self.write()?;
        if books.contains_key(&book.id) {
            return Err(AppError::Conflict(BOOK_ALREADY_EXISTS.to_string()));
        }
        books.insert(book.id, book.clone());
        Ok(book)
    }

    /// Replace the book stored at `id`; `book.id` is kept as supplied
    pub fn update(&self, id: i64, book: Book) -> AppResult<Book> {
        let mut books = self.write()?;
        let slot = books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;
        *slot = book.clone();
        Ok(book)
    }

    /// Delete book
    pub fn delete(&self, id: i64) -> AppResult<()> {
        self.write()?
            .shift_remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    pub fn count(&self) -> AppResult<usize> {
        Ok(self.read()?.len())
    }
}
