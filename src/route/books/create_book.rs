use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    book::Book,
    error::ErrorVerbosityProvider,
    extractor::{json::ApiJson, validated::Validated},
    state::ApiState,
};

use super::BookError;

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateBookResponse {
    pub book: Book,
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Stores a new book.
///
/// The body is rejected with `400` if it does not deserialize into a [`Book`],
/// e.g. `"pages": "264"`, or if it fails validation.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = CreateBookResponse),
        (status = 400, description = "Malformed or invalid book"),
        (status = 409, description = "A book with this ISBN already exists"),
    )
)]
#[tracing::instrument(name = "create_book", skip_all, fields(isbn = %book.isbn))]
pub async fn create_book(
    State(state): State<ApiState>,
    Validated(ApiJson(book)): Validated<ApiJson<Book>>,
) -> Result<CreateBookResponse, BookError> {
    let book = state
        .books()
        .create(&book)
        .await
        .map_err(|err| BookError::from_store_error(state.error_verbosity(), err))?;

    tracing::info!("Book created");

    Ok(CreateBookResponse { book })
}
