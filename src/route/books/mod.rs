use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    book::Book,
    error::{ErrorVerbosity, InternalServerError, ResourceError, ResourceErrorProvider},
    store::BookStoreError,
};

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

#[cfg(test)]
mod test;

#[derive(Debug, Serialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "error_type")]
pub enum BookErrorType {
    NotFound {
        #[serde(skip)]
        isbn: String,
    },
    AlreadyExists {
        #[serde(skip)]
        isbn: String,
    },
}

#[derive(Debug, Serialize)]
pub struct BookErrorContext {
    pub reason: String,
}

impl ResourceErrorProvider for BookErrorType {
    type Context = BookErrorContext;

    fn headers(&self) -> Option<HeaderMap> {
        None
    }

    fn status_code(&self) -> StatusCode {
        match self {
            BookErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
            BookErrorType::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            BookErrorType::NotFound { .. } => "Book not found",
            BookErrorType::AlreadyExists { .. } => "Book already exists",
        }
    }

    fn context(&self) -> Self::Context {
        match self {
            BookErrorType::NotFound { isbn } => BookErrorContext {
                reason: format!("Book with isbn {isbn} not found"),
            },
            BookErrorType::AlreadyExists { isbn } => BookErrorContext {
                reason: format!("Book with isbn {isbn} already exists"),
            },
        }
    }
}

pub type BookError = ResourceError<BookErrorType>;

impl ResourceError<BookErrorType> {
    fn from_store_error(verbosity: ErrorVerbosity, err: BookStoreError) -> Self {
        match err {
            BookStoreError::NotFound(isbn) => {
                ResourceError::new(verbosity, BookErrorType::NotFound { isbn })
            }
            BookStoreError::AlreadyExists(isbn) => {
                ResourceError::new(verbosity, BookErrorType::AlreadyExists { isbn })
            }
            err @ BookStoreError::Database(_) => {
                InternalServerError::from_generic_error(verbosity, err).into()
            }
        }
    }
}
