use axum::extract::State;

use crate::{error::ErrorVerbosityProvider, extractor::path::ApiPath, state::ApiState};

use super::{BookError, BookResponse};

#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 200, description = "The book", body = BookResponse),
        (status = 404, description = "No book with this ISBN"),
    )
)]
#[tracing::instrument(name = "get_book", skip_all, fields(isbn = %isbn))]
pub async fn get_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
) -> Result<BookResponse, BookError> {
    let book = state
        .books()
        .get(&isbn)
        .await
        .map_err(|err| BookError::from_store_error(state.error_verbosity(), err))?;

    Ok(BookResponse { book })
}
