use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A row of the `books` table.
///
/// Also the body of `POST /books`. `pages` and `year` are plain integers, so numeric
/// strings such as `"264"` are rejected while deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema, Validate, sqlx::FromRow)]
pub struct Book {
    #[validate(custom(function = "validate_isbn"))]
    #[schema(example = "0691161518")]
    pub isbn: String,
    #[validate(url(message = "Must be a valid URL"))]
    pub amazon_url: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub language: String,
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub pages: i32,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub publisher: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub title: String,
    pub year: i32,
}

/// Every column of a book except its key. Body of `PUT /books/:isbn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema, Validate)]
pub struct BookData {
    #[validate(url(message = "Must be a valid URL"))]
    pub amazon_url: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub language: String,
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub pages: i32,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub publisher: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub title: String,
    pub year: i32,
}

#[cfg(test)]
impl Book {
    pub fn from_data(isbn: String, data: BookData) -> Self {
        Book {
            isbn,
            amazon_url: data.amazon_url,
            author: data.author,
            language: data.language,
            pages: data.pages,
            publisher: data.publisher,
            title: data.title,
            year: data.year,
        }
    }
}

/// Accepts ISBN-10 and ISBN-13 without separators. Only the shape is checked, not the check digit.
fn validate_isbn(isbn: &str) -> Result<(), ValidationError> {
    let bytes = isbn.as_bytes();

    let valid = match bytes.len() {
        10 => {
            let (body, last) = bytes.split_at(9);

            body.iter().all(u8::is_ascii_digit) && (last[0].is_ascii_digit() || last[0] == b'X')
        }
        13 => bytes.iter().all(u8::is_ascii_digit),
        _ => false,
    };

    if valid {
        return Ok(());
    }

    let mut error = ValidationError::new("isbn");
    error.message = Some("Must be an ISBN-10 or ISBN-13 made of digits".into());

    Err(error)
}
