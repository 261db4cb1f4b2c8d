use axum::extract::State;

use crate::{
    book::BookData,
    error::ErrorVerbosityProvider,
    extractor::{json::ApiJson, path::ApiPath, validated::Validated},
    state::ApiState,
};

use super::{BookError, BookResponse};

/// Replaces every field of a book.
///
/// The isbn in the path is the key. An `isbn` in the body is ignored.
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    request_body = BookData,
    responses(
        (status = 200, description = "Book replaced", body = BookResponse),
        (status = 400, description = "Malformed or invalid book"),
        (status = 404, description = "No book with this ISBN"),
    )
)]
#[tracing::instrument(name = "update_book", skip_all, fields(isbn = %isbn))]
pub async fn update_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
    Validated(ApiJson(data)): Validated<ApiJson<BookData>>,
) -> Result<BookResponse, BookError> {
    let book = state
        .books()
        .update(&isbn, &data)
        .await
        .map_err(|err| BookError::from_store_error(state.error_verbosity(), err))?;

    tracing::info!("Book updated");

    Ok(BookResponse { book })
}
