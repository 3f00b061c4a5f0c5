//! Repository layer for database operations

pub mod books;
pub mod borrows;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool.
/// Constructed explicitly from a pool and passed in; there is no global
/// connection singleton, so tests can build isolated instances.
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        let books = books::BooksRepository::new(pool.clone());
        Self {
            borrows: borrows::BorrowsRepository::new(pool.clone(), books.clone()),
            books,
            pool,
        }
    }
}
