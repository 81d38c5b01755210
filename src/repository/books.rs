//! Books repository for PostgreSQL

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{BookOrder, BookStore};
use crate::{
    error::AppResult,
    models::book::{Book, BookFields},
};

const BOOK_COLUMNS: &str = "id, title, author, genre, year, created_at, updated_at";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn insert(&self, fields: &BookFields) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (title, author, genre, year, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(&fields.title)
            .bind(&fields.author)
            .bind(&fields.genre)
            .bind(fields.year)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self, order: BookOrder) -> AppResult<Vec<Book>> {
        let order_by = match order {
            BookOrder::Unordered => "id",
            BookOrder::NewestFirst => "created_at DESC, id DESC",
        };
        let query = format!("SELECT {} FROM books ORDER BY {}", BOOK_COLUMNS, order_by);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, fields: &BookFields) -> AppResult<Option<Book>> {
        let query = format!(
            r#"
            UPDATE books
            SET title = $1, author = $2, genre = $3, year = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(&fields.title)
            .bind(&fields.author)
            .bind(&fields.genre)
            .bind(fields.year)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        // strpos keeps the match literal: no LIKE wildcards, no case folding
        let sql = format!(
            r#"
            SELECT {}
            FROM books
            WHERE strpos(title, $1) > 0
               OR strpos(author, $1) > 0
               OR strpos(COALESCE(genre, ''), $1) > 0
               OR strpos(COALESCE(year::text, ''), $1) > 0
            ORDER BY created_at DESC, id DESC
            "#,
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&sql)
            .bind(query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
