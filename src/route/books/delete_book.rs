use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::ErrorVerbosityProvider, extractor::path::ApiPath, state::ApiState};

use super::BookError;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteBookResponse {
    pub message: String,
}

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 200, description = "Book deleted", body = DeleteBookResponse),
        (status = 404, description = "No book with this ISBN"),
    )
)]
#[tracing::instrument(name = "delete_book", skip_all, fields(isbn = %isbn))]
pub async fn delete_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
) -> Result<DeleteBookResponse, BookError> {
    state
        .books()
        .delete(&isbn)
        .await
        .map_err(|err| BookError::from_store_error(state.error_verbosity(), err))?;

    tracing::info!("Book deleted");

    Ok(DeleteBookResponse {
        message: "Book deleted".to_string(),
    })
}
