//! Book service: validation boundary in front of the store

use validator::Validate;

use crate::{error::AppResult, models::book::Book, repository::Repository};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list()
    }

    pub fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id)
    }

    /// Validate then insert. Invalid books never reach the store.
    pub fn create(&self, book: Book) -> AppResult<Book> {
        book.validate()?;
        let book = self.repository.books.create(book)?;
        tracing::debug!(id = book.id, "Book created");
        Ok(book)
    }

    /// Validate then replace the book stored at `id`.
    ///
    /// The body's own `id` is stored as supplied even when it differs from
    /// `id`; the mismatch is only logged.
    pub fn update(&self, id: i64, book: Book) -> AppResult<Book> {
        book.validate()?;
        if book.id != id {
            tracing::warn!(
                path_id = id,
                body_id = book.id,
                "Book stored under an id that differs from its body id"
            );
        }
        self.repository.books.update(id, book)
    }

    pub fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id)?;
        tracing::debug!(id, "Book deleted");
        Ok(())
    }

    /// Number of stored books (for health and shutdown reporting)
    pub fn count(&self) -> AppResult<usize> {
        self.repository.books.count()
    }
}
