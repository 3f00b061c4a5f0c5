//! Data models for Bookshelf

pub mod book;
pub mod borrow;

pub use book::{Book, BookPayload, NewBook};
pub use borrow::{Borrow, BorrowPayload, BorrowSummary, NewBorrow};
