//! Borrow/return service

use crate::{
    error::AppResult,
    models::borrow::{Borrow, BorrowSummary, NewBorrow},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow copies of a book. Fails with not-found if the book is absent
    /// and with a capacity error if fewer copies are available than asked.
    pub async fn borrow(&self, borrow: NewBorrow) -> AppResult<Borrow> {
        self.repository.borrows.create(&borrow).await
    }

    /// Return a borrow by record ID, restoring the book's copies
    pub async fn return_borrow(&self, borrow_id: i32) -> AppResult<()> {
        self.repository.borrows.return_borrow(borrow_id).await
    }

    /// Aggregate total borrowed quantity per book
    pub async fn summary(&self) -> AppResult<Vec<BorrowSummary>> {
        self.repository.borrows.summary().await
    }
}
