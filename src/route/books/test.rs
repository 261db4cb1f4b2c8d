use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{book::Book, db, error::ErrorVerbosity, server::router, state::ApiState};

fn hobbit() -> Book {
    Book {
        isbn: "1234567890".to_string(),
        amazon_url: "https://www.amazon.com/Hobbit-JRR-Tolkien-ebook/dp/B004K19Y76".to_string(),
        author: "JRR Tolkien".to_string(),
        language: "English".to_string(),
        pages: 220,
        publisher: "HarperCollins".to_string(),
        title: "The Hobbit".to_string(),
        year: 1937,
    }
}

fn power_up() -> Value {
    json!({
        "isbn": "0691161518",
        "amazon_url": "http://a.co/eobPtX2",
        "author": "Matthew Lane",
        "language": "english",
        "pages": 264,
        "publisher": "Princeton University Press",
        "title": "Power-Up: Unlocking the Hidden Mathematics in Video Games",
        "year": 2017
    })
}

async fn app_with(verbosity: ErrorVerbosity, books: &[Book]) -> Router {
    let pool = db::in_memory().await.unwrap();
    let state = ApiState::new(verbosity, pool);

    for book in books {
        state.books().create(book).await.unwrap();
    }

    router(state, false)
}

/// App holding only "The Hobbit", with full error verbosity.
async fn app() -> Router {
    app_with(ErrorVerbosity::Full, &[hobbit()]).await
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn hobbit_json() -> Value {
    serde_json::to_value(hobbit()).unwrap()
}

// --- GET /books ---

#[tokio::test]
async fn list_books_returns_all_books() {
    let app = app().await;

    let (status, body) = send(&app, request(Method::GET, "/books")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "books": [{
                "isbn": "1234567890",
                "title": "The Hobbit",
                "author": "JRR Tolkien",
                "year": 1937,
                "pages": 220,
                "publisher": "HarperCollins",
                "language": "English",
                "amazon_url": "https://www.amazon.com/Hobbit-JRR-Tolkien-ebook/dp/B004K19Y76"
            }]
        })
    );
}

#[tokio::test]
async fn list_books_empty_table() {
    let app = app_with(ErrorVerbosity::Full, &[]).await;

    let (status, body) = send(&app, request(Method::GET, "/books")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [] }));
}

// --- GET /books/:isbn ---

#[tokio::test]
async fn get_book_by_isbn() {
    let app = app().await;

    let (status, body) = send(&app, request(Method::GET, "/books/1234567890")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": hobbit_json() }));
}

#[tokio::test]
async fn get_book_unknown_isbn_returns_404() {
    let app = app().await;

    let (status, body) = send(&app, request(Method::GET, "/books/123123321321")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
    assert_eq!(body["message"], "Book not found");
    assert!(body["context"]["reason"]
        .as_str()
        .unwrap()
        .contains("123123321321"));
}

// --- POST /books ---

#[tokio::test]
async fn create_book_returns_201() {
    let app = app().await;

    let (status, body) = send(&app, json_request(Method::POST, "/books", &power_up())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "book": power_up() }));

    let (status, body) = send(&app, request(Method::GET, "/books/0691161518")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": power_up() }));
}

#[tokio::test]
async fn create_book_non_numeric_isbn_returns_400() {
    let app = app().await;
    let mut book = power_up();
    book["isbn"] = json!("asdfasdffasdf");

    let (status, body) = send(&app, json_request(Method::POST, "/books", &book)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Validation");
    assert!(body["error"]["validation_errors"].get("isbn").is_some());
}

#[tokio::test]
async fn create_book_multi_byte_isbn_returns_400() {
    let app = app().await;
    let mut book = power_up();
    book["isbn"] = json!("12345678é");

    let (status, body) = send(&app, json_request(Method::POST, "/books", &book)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Validation");
    assert!(body["error"]["validation_errors"].get("isbn").is_some());
}

#[tokio::test]
async fn create_book_pages_as_string_returns_400() {
    let app = app().await;
    let mut book = power_up();
    book["pages"] = json!("264");

    let (status, body) = send(&app, json_request(Method::POST, "/books", &book)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Body");
    assert!(body["error"]["body_error_reason"].as_str().is_some());
    assert!(body["error"]["body_expected_schema"].as_str().is_some());
}

#[tokio::test]
async fn create_book_year_as_string_returns_400() {
    let app = app().await;
    let mut book = power_up();
    book["year"] = json!("2017");

    let (status, body) = send(&app, json_request(Method::POST, "/books", &book)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Body");
}

#[tokio::test]
async fn create_book_missing_field_returns_400() {
    let app = app().await;
    let mut book = power_up();
    book.as_object_mut().unwrap().remove("publisher");

    let (status, _) = send(&app, json_request(Method::POST, "/books", &book)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_book_without_json_content_type_returns_400() {
    let app = app().await;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .body(Body::from(power_up().to_string()))
        .unwrap();

    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Body");
}

#[tokio::test]
async fn create_book_duplicate_isbn_returns_409() {
    let app = app().await;

    let (status, body) = send(&app, json_request(Method::POST, "/books", &hobbit_json())).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_type"], "AlreadyExists");
}

// --- PUT /books/:isbn ---

#[tokio::test]
async fn update_book_replaces_the_book() {
    let app = app().await;
    let mut book = hobbit_json();
    book["title"] = json!("I changed this for my test");
    book["pages"] = json!(999);
    book["year"] = json!(2020);

    let (status, body) = send(&app, json_request(Method::PUT, "/books/1234567890", &book)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": book }));

    let (_, body) = send(&app, request(Method::GET, "/books/1234567890")).await;

    assert_eq!(body, json!({ "book": book }));
}

#[tokio::test]
async fn update_book_ignores_isbn_in_body() {
    let app = app().await;
    let mut book = hobbit_json();
    book["isbn"] = json!("0691161518");

    let (status, body) = send(&app, json_request(Method::PUT, "/books/1234567890", &book)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["isbn"], "1234567890");
}

#[tokio::test]
async fn update_book_unknown_isbn_returns_404() {
    let app = app().await;

    let (status, body) =
        send(&app, json_request(Method::PUT, "/books/sadfasdf", &hobbit_json())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
}

#[tokio::test]
async fn update_book_with_string_numbers_returns_400() {
    let app = app().await;
    let mut book = hobbit_json();
    book["pages"] = json!("999");
    book["year"] = json!("2000");

    let (status, _) = send(&app, json_request(Method::PUT, "/books/1234567890", &book)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, request(Method::GET, "/books/1234567890")).await;

    assert_eq!(body, json!({ "book": hobbit_json() }));
}

#[tokio::test]
async fn update_book_failing_validation_returns_400() {
    let app = app().await;
    let mut book = hobbit_json();
    book["title"] = json!("");

    let (status, body) = send(&app, json_request(Method::PUT, "/books/1234567890", &book)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Validation");
    assert!(body["error"]["validation_errors"].get("title").is_some());
}

// --- DELETE /books/:isbn ---

#[tokio::test]
async fn delete_book_returns_message() {
    let app = app().await;

    let (status, body) = send(&app, request(Method::DELETE, "/books/1234567890")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book deleted" }));

    let (status, _) = send(&app, request(Method::GET, "/books/1234567890")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_book_unknown_isbn_returns_404() {
    let app = app().await;

    let (status, _) = send(&app, request(Method::DELETE, "/books/9999999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- routing ---

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = app().await;

    let (status, body) = send(&app, request(Method::GET, "/authors")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
    assert_eq!(body["message"], "The requested resource was not found");
}

#[tokio::test]
async fn wrong_method_returns_405() {
    let app = app().await;

    let (status, body) = send(&app, request(Method::PATCH, "/books")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error_type"], "MethodNotAllowed");

    let (status, body) = send(&app, request(Method::PATCH, "/books/1234567890")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error_type"], "MethodNotAllowed");
}

#[tokio::test]
async fn traced_response_body_is_passed_through() {
    let pool = db::in_memory().await.unwrap();
    let state = ApiState::new(ErrorVerbosity::Full, pool);
    state.books().create(&hobbit()).await.unwrap();
    let app = router(state, true);

    let (status, body) = send(&app, request(Method::GET, "/books/1234567890")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": hobbit_json() }));

    let (status, body) = send(&app, request(Method::GET, "/books/9999999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
}

#[tokio::test]
async fn openapi_document_lists_book_routes() {
    let app = app().await;

    let (status, body) = send(&app, request(Method::GET, "/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/books").is_some());
    assert!(body["paths"].get("/books/{isbn}").is_some());
}

// --- error verbosity ---

#[tokio::test]
async fn message_verbosity_only_returns_the_message() {
    let app = app_with(ErrorVerbosity::Message, &[]).await;

    let (status, body) = send(&app, request(Method::GET, "/books/1234567890")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Book not found" }));
}

#[tokio::test]
async fn type_verbosity_hides_reasons() {
    let app = app_with(ErrorVerbosity::Type, &[]).await;

    let (status, body) = send(&app, request(Method::GET, "/books/1234567890")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "error_type": "NotFound", "message": "Book not found" })
    );

    let mut book = power_up();
    book["pages"] = json!("264");

    let (status, body) = send(&app, json_request(Method::POST, "/books", &book)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Body");
    assert!(body["error"]["body_error_reason"].is_null());
    assert!(body["error"]["body_expected_schema"].is_null());
}

#[tokio::test]
async fn status_code_verbosity_returns_an_empty_body() {
    let app = app_with(ErrorVerbosity::StatusCode, &[]).await;

    let (status, body) = send(&app, request(Method::DELETE, "/books/1234567890")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, json_request(Method::POST, "/books", &json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, Value::Null);
}
