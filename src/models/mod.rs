//! Data models for the Digital Library

pub mod book;

// Re-export commonly used types
pub use book::{Book, BookResponse, MessageResponse};
