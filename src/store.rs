use sqlx::SqlitePool;

use crate::book::{Book, BookData};

const BOOK_COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

#[derive(Debug, thiserror::Error)]
pub enum BookStoreError {
    #[error("Book with isbn {0} not found")]
    NotFound(String),
    #[error("Book with isbn {0} already exists")]
    AlreadyExists(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// SQL access to the `books` table.
#[derive(Clone)]
pub struct BookStore {
    pool: SqlitePool,
}

impl BookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Book>, BookStoreError> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY title"
        ))
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = books.len(), "Fetched books");

        Ok(books)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, isbn: &str) -> Result<Book, BookStoreError> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE isbn = ?"
        ))
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| BookStoreError::NotFound(isbn.to_string()))
    }

    #[tracing::instrument(skip_all, fields(isbn = %book.isbn))]
    pub async fn create(&self, book: &Book) -> Result<Book, BookStoreError> {
        let created = sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books ({BOOK_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {BOOK_COLUMNS}"
        ))
        .bind(&book.isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                BookStoreError::AlreadyExists(book.isbn.clone())
            }
            err => BookStoreError::Database(err),
        })?;

        tracing::debug!("Created book");

        Ok(created)
    }

    /// Replaces every column of the book except its isbn.
    #[tracing::instrument(skip(self, data))]
    pub async fn update(&self, isbn: &str, data: &BookData) -> Result<Book, BookStoreError> {
        let updated = sqlx::query_as::<_, Book>(&format!(
            "UPDATE books \
             SET amazon_url = ?, author = ?, language = ?, pages = ?, publisher = ?, title = ?, year = ? \
             WHERE isbn = ? \
             RETURNING {BOOK_COLUMNS}"
        ))
        .bind(&data.amazon_url)
        .bind(&data.author)
        .bind(&data.language)
        .bind(data.pages)
        .bind(&data.publisher)
        .bind(&data.title)
        .bind(data.year)
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| BookStoreError::NotFound(isbn.to_string()))?;

        tracing::debug!("Updated book");

        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, isbn: &str) -> Result<(), BookStoreError> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = ?")
            .bind(isbn)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BookStoreError::NotFound(isbn.to_string()));
        }

        tracing::debug!("Deleted book");

        Ok(())
    }
}
