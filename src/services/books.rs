//! Book catalog service

use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
    repository::Repository,
};

/// One page of the catalog with pagination metadata
#[derive(Debug)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_books: i64,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books, most recently created first. Non-positive page or limit
    /// values are treated as unset and fall back to the defaults (page 1,
    /// limit 10); the limit has no upper bound.
    pub async fn list(&self, page: Option<i64>, limit: Option<i64>) -> AppResult<BookPage> {
        let page = page_or_default(page);
        let limit = limit_or_default(limit);

        let (books, total) = self.repository.books.list(page, limit).await?;

        Ok(BookPage {
            books,
            current_page: page,
            total_pages: total_pages(total, limit),
            total_books: total,
        })
    }

    /// Get a book by ID
    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book from validated data
    pub async fn create(&self, book: NewBook) -> AppResult<Book> {
        self.repository.books.create(&book).await
    }

    /// Replace a book's document with validated data
    pub async fn update(&self, id: i32, book: NewBook) -> AppResult<Book> {
        self.repository.books.update(id, &book).await
    }

    /// Delete a book. Outstanding borrow records are not cascaded.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}

fn page_or_default(page: Option<i64>) -> i64 {
    page.filter(|p| *p >= 1).unwrap_or(1)
}

fn limit_or_default(limit: Option<i64>) -> i64 {
    limit.filter(|l| *l >= 1).unwrap_or(10)
}

fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}
