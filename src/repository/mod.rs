//! Repository layer for book persistence

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookFields},
};

/// Ordering applied to a full listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookOrder {
    /// Storage order (ascending id)
    #[default]
    Unordered,
    /// Creation time, newest first; ties broken by id
    NewestFirst,
}

/// Storage collaborator for book records.
///
/// Implementations never validate: callers hand over fields that already passed
/// `BookForm::validate_for`.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    async fn insert(&self, fields: &BookFields) -> AppResult<Book>;

    async fn find_all(&self, order: BookOrder) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Replace every mutable field; `None` when no record has this id
    async fn update(&self, id: i32, fields: &BookFields) -> AppResult<Option<Book>>;

    /// `false` when no record has this id
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Records whose title, author, genre or year contain `query` (case-sensitive), newest first
    async fn search(&self, query: &str) -> AppResult<Vec<Book>>;

    async fn count(&self) -> AppResult<i64>;
}

/// Main repository struct holding the injected storage handle
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a repository backed by PostgreSQL
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool)),
        }
    }

    /// Create a repository that keeps records in process memory
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(memory::MemoryBooksRepository::default()),
        }
    }
}
