//! Book API endpoints

use axum::{extract::State, Json};

use crate::{
    error::{AppResult, ErrorResponse, ValidationErrorResponse},
    models::book::{Book, BookResponse, MessageResponse},
    AppState,
};

use super::{AppJson, AppPath};

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 200, description = "Book added", body = BookResponse),
        (status = 400, description = "A book with this ID already exists", body = ErrorResponse),
        (status = 422, description = "Invalid book", body = ValidationErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AppJson(book): AppJson<Book>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.create(book)?;
    Ok(Json(BookResponse {
        message: "Book added successfully".to_string(),
        book,
    }))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books, in insertion order", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list()?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(id)?;
    Ok(Json(book))
}

/// Replace a book
///
/// The body is stored as-is under `id`, including its own `id` field.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 422, description = "Invalid book", body = ValidationErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(book): AppJson<Book>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.update(id, book)?;
    Ok(Json(BookResponse {
        message: "Book updated successfully".to_string(),
        book,
    }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(id)?;
    Ok(Json(MessageResponse::new("Book deleted successfully")))
}
