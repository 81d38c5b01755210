//! In-process book store, used for demo runs and tests

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BookOrder, BookStore};
use crate::{
    error::AppResult,
    models::book::{Book, BookFields},
};

#[derive(Default)]
struct Table {
    rows: Vec<Book>,
    last_id: i32,
}

#[derive(Default)]
pub struct MemoryBooksRepository {
    table: RwLock<Table>,
}

fn newest_first(books: &mut [Book]) {
    books.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl BookStore for MemoryBooksRepository {
    async fn insert(&self, fields: &BookFields) -> AppResult<Book> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let now = Utc::now();
        let book = Book {
            id: table.last_id,
            title: fields.title.clone(),
            author: fields.author.clone(),
            genre: fields.genre.clone(),
            year: fields.year,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(book.clone());
        Ok(book)
    }

    async fn find_all(&self, order: BookOrder) -> AppResult<Vec<Book>> {
        let mut books = self.table.read().await.rows.clone();
        if order == BookOrder::NewestFirst {
            newest_first(&mut books);
        }
        Ok(books)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|b| b.id == id).cloned())
    }

    async fn update(&self, id: i32, fields: &BookFields) -> AppResult<Option<Book>> {
        let mut table = self.table.write().await;
        let Some(book) = table.rows.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        book.title = fields.title.clone();
        book.author = fields.author.clone();
        book.genre = fields.genre.clone();
        book.year = fields.year;
        book.updated_at = Utc::now();
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|b| b.id != id);
        Ok(table.rows.len() < before)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let mut books: Vec<Book> = self
            .table
            .read()
            .await
            .rows
            .iter()
            .filter(|b| b.matches(query))
            .cloned()
            .collect();
        newest_first(&mut books);
        Ok(books)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.table.read().await.rows.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, author: &str) -> BookFields {
        BookFields {
            title: title.to_string(),
            author: author.to_string(),
            genre: None,
            year: None,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_monotonically() {
        let store = MemoryBooksRepository::default();
        let a = store.insert(&fields("A", "x")).await.unwrap();
        let b = store.insert(&fields("B", "y")).await.unwrap();
        assert!(b.id > a.id);

        // Deleting the newest record never frees its id
        assert!(store.delete(b.id).await.unwrap());
        let c = store.insert(&fields("C", "z")).await.unwrap();
        assert!(c.id > b.id);
    }

    #[tokio::test]
    async fn newest_first_puts_latest_insert_on_top() {
        let store = MemoryBooksRepository::default();
        for i in 0..5 {
            store.insert(&fields(&format!("Book {}", i), "x")).await.unwrap();
        }
        let books = store.find_all(BookOrder::NewestFirst).await.unwrap();
        assert_eq!(books[0].title, "Book 4");
        for pair in books.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn unordered_listing_follows_insertion() {
        let store = MemoryBooksRepository::default();
        for title in ["A", "B", "C"] {
            store.insert(&fields(title, "x")).await.unwrap();
        }
        let titles: Vec<String> = store
            .find_all(BookOrder::Unordered)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_none() {
        let store = MemoryBooksRepository::default();
        assert!(store.update(42, &fields("A", "x")).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_leaves_table_alone() {
        let store = MemoryBooksRepository::default();
        store.insert(&fields("A", "x")).await.unwrap();
        assert!(!store.delete(99).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn search_is_logical_or_across_fields() {
        let store = MemoryBooksRepository::default();
        store
            .insert(&BookFields {
                title: "Neuromancer".to_string(),
                author: "William Gibson".to_string(),
                genre: Some("Cyberpunk".to_string()),
                year: Some(1984),
            })
            .await
            .unwrap();
        store.insert(&fields("1984", "George Orwell")).await.unwrap();

        let hits = store.search("1984").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(store.search("Gibson").await.unwrap().len(), 1);
        assert!(store.search("gibson").await.unwrap().is_empty());
    }
}
