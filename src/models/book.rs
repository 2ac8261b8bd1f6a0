//! Book model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Book record, both the request body and the stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Book {
    /// Client-supplied identifier, unique in the store
    #[schema(example = 1)]
    pub id: i64,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    #[schema(example = "Dune")]
    pub title: String,
    #[schema(example = "Herbert")]
    pub author: String,
    /// Publication year (1000-2026)
    #[validate(range(min = 1000, max = 2026, message = "Year must be between 1000 and 2026"))]
    #[schema(example = 1965, minimum = 1000, maximum = 2026)]
    pub year: i32,
    /// 10 to 13 characters
    #[validate(length(min = 10, max = 13, message = "ISBN must be between 10 and 13 characters"))]
    #[schema(example = "0441013597", min_length = 10, max_length = 13)]
    pub isbn: String,
}

/// Response for create and update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub message: String,
    pub book: Book,
}

/// Plain acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
