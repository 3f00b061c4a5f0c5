//! Books repository for database operations

use sqlx::{PgExecutor, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List one page of books, most recently created first, with the total count
    pub async fn list(&self, page: i64, limit: i64) -> AppResult<(Vec<Book>, i64)> {
        let offset = (page - 1) * limit;

        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Create a new book. `available` is computed from `copies` in the same
    /// statement; a unique violation on `isbn` surfaces as the domain error.
    pub async fn create(&self, book: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, genre, isbn, description, copies, available)
            VALUES ($1, $2, $3, $4, $5, $6, $6 > 0)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(&book.isbn)
        .bind(&book.description)
        .bind(book.copies)
        .fetch_one(&self.pool)
        .await
        .map_err(map_isbn_conflict)
    }

    /// Full-document update, recomputing `available` from the new `copies`
    pub async fn update(&self, id: i32, book: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, author = $3, genre = $4, isbn = $5, description = $6,
                copies = $7, available = $7 > 0, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(&book.isbn)
        .bind(&book.description)
        .bind(book.copies)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_isbn_conflict)?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Delete book by ID. Outstanding borrow records are left in place.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        Ok(())
    }

    /// Fetch a book with its row locked for the rest of the transaction
    pub async fn get_for_update<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        id: i32,
    ) -> AppResult<Option<Book>> {
        Ok(
            sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Single entry point for changing `copies`. Recomputes `available` in
    /// the same statement and refuses to take the count negative; returns
    /// `None` when the book is absent or the guard rejects the delta.
    pub async fn adjust_copies<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        id: i32,
        delta: i32,
    ) -> AppResult<Option<Book>> {
        Ok(sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET copies = copies + $2, available = copies + $2 > 0, updated_at = NOW()
            WHERE id = $1 AND copies + $2 >= 0
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(executor)
        .await?)
    }
}

fn map_isbn_conflict(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateIsbn,
        _ => AppError::Database(e),
    }
}
