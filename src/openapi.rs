use utoipa::OpenApi;

use crate::{
    book::{Book, BookData},
    route::books::{
        create_book::CreateBookResponse, delete_book::DeleteBookResponse,
        list_books::ListBooksResponse, BookResponse,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::route::books::list_books::list_books,
        crate::route::books::get_book::get_book,
        crate::route::books::create_book::create_book,
        crate::route::books::update_book::update_book,
        crate::route::books::delete_book::delete_book,
    ),
    components(schemas(
        Book,
        BookData,
        BookResponse,
        ListBooksResponse,
        CreateBookResponse,
        DeleteBookResponse
    )),
    tags((name = "books", description = "Books CRUD"))
)]
pub struct ApiDoc;
