//! Borrows repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrow::{Borrow, BorrowSummary, NewBorrow},
    repository::books::BooksRepository,
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
    books: BooksRepository,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>, books: BooksRepository) -> Self {
        Self { pool, books }
    }

    /// Get borrow record by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Borrow> {
        sqlx::query_as::<_, Borrow>("SELECT * FROM borrows WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Borrow record not found".to_string()))
    }

    /// Create a borrow record and decrement the book's copies in one
    /// transaction. The book row stays locked between the availability check
    /// and the decrement, so concurrent borrows of the same book serialize
    /// and `copies` can never go negative.
    pub async fn create(&self, borrow: &NewBorrow) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        let book = self
            .books
            .get_for_update(&mut *tx, borrow.book_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        if book.copies < borrow.quantity {
            return Err(AppError::InsufficientCopies {
                available: book.copies,
            });
        }

        let record = sqlx::query_as::<_, Borrow>(
            r#"
            INSERT INTO borrows (book_id, quantity, due_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(borrow.book_id)
        .bind(borrow.quantity)
        .bind(borrow.due_date)
        .fetch_one(&mut *tx)
        .await?;

        self.books
            .adjust_copies(&mut *tx, borrow.book_id, -borrow.quantity)
            .await?
            .ok_or_else(|| {
                AppError::Internal("copies adjustment failed under row lock".to_string())
            })?;

        tx.commit().await?;
        Ok(record)
    }

    /// Return a borrow: restore the book's copies and delete the record, in
    /// one transaction. The book may have been deleted in the meantime; the
    /// record is removed either way.
    pub async fn return_borrow(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let borrow =
            sqlx::query_as::<_, Borrow>("SELECT * FROM borrows WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Borrow record not found".to_string()))?;

        self.books
            .adjust_copies(&mut *tx, borrow.book_id, borrow.quantity)
            .await?;

        sqlx::query("DELETE FROM borrows WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Total borrowed quantity per book, joined with title and ISBN. Books
    /// with no outstanding borrows are absent; the inner join also drops
    /// records whose book has been deleted.
    pub async fn summary(&self) -> AppResult<Vec<BorrowSummary>> {
        let rows = sqlx::query_as::<_, BorrowSummary>(
            r#"
            SELECT br.book_id, b.title, b.isbn, SUM(br.quantity)::BIGINT AS total_quantity
            FROM borrows br
            JOIN books b ON b.id = br.book_id
            GROUP BY br.book_id, b.title, b.isbn
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
