//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookForm},
    repository::{BookOrder, Repository},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate the submission and persist a new book.
    ///
    /// Fails with `AppError::Validation` carrying the draft; nothing is stored in that case.
    pub async fn create_book(&self, form: &BookForm) -> AppResult<Book> {
        let fields = form.validate_for(None)?;
        let book = self.repository.books.insert(&fields).await?;
        tracing::info!("Created book id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    /// All books, newest first
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.find_all(BookOrder::NewestFirst).await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Change the fields of an existing book that the submission carries.
    ///
    /// Keys left out of the form keep their stored values. The book must exist before the
    /// submission is validated; a rejected submission leaves the stored record untouched.
    pub async fn update_book(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        let stored = self.get_book(id).await?;
        let fields = form.merged_over(&stored).validate_for(Some(id))?;
        let book = self
            .repository
            .books
            .update(id, &fields)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        tracing::info!("Updated book id={}", book.id);
        Ok(book)
    }

    /// Delete a book permanently
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        if !self.repository.books.delete(id).await? {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    /// Books whose title, author, genre or year contain `query`
    pub async fn search_books(&self, query: &str) -> AppResult<Vec<Book>> {
        self.repository.books.search(query).await
    }

    /// Number of stored books
    pub async fn count_books(&self) -> AppResult<i64> {
        self.repository.books.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CatalogService {
        CatalogService::new(Repository::in_memory())
    }

    fn form(title: &str, author: &str, genre: Option<&str>, year: Option<&str>) -> BookForm {
        BookForm {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            genre: genre.map(str::to_string),
            year: year.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn created_book_round_trips_through_get() {
        let catalog = service();
        let created = catalog
            .create_book(&form("Kindred", "Octavia E. Butler", Some("Fiction"), Some("1979")))
            .await
            .unwrap();

        let found = catalog.get_book(created.id).await.unwrap();
        assert_eq!(found, created);
        assert_eq!(found.year, Some(1979));
        assert_eq!(found.genre.as_deref(), Some("Fiction"));
    }

    #[tokio::test]
    async fn rejected_create_stores_nothing() {
        let catalog = service();
        let err = catalog
            .create_book(&form("", "", None, None))
            .await
            .unwrap_err();

        match err {
            AppError::Validation(failure) => {
                assert_eq!(failure.fields(), vec!["title", "author"]);
                assert_eq!(failure.draft.id, None);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert_eq!(catalog.count_books().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_preserves_id_and_replaces_fields() {
        let catalog = service();
        let created = catalog
            .create_book(&form("Beloved", "Toni Morrison", None, None))
            .await
            .unwrap();

        let updated = catalog
            .update_book(created.id, &form("Beloved", "Toni Morrison", Some("Novel"), Some("1987")))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Beloved");
        assert_eq!(updated.genre.as_deref(), Some("Novel"));
        assert_eq!(updated.year, Some(1987));
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_without_optional_keys_keeps_genre_and_year() {
        let catalog = service();
        let created = catalog
            .create_book(&form("Kindred", "Octavia Butler", Some("Fiction"), Some("1979")))
            .await
            .unwrap();

        let updated = catalog
            .update_book(created.id, &form("Kindred", "Octavia E. Butler", None, None))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.author, "Octavia E. Butler");
        assert_eq!(updated.genre.as_deref(), Some("Fiction"));
        assert_eq!(updated.year, Some(1979));
        assert_eq!(catalog.get_book(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_with_single_key_touches_only_that_field() {
        let catalog = service();
        let created = catalog
            .create_book(&form("Kindred", "Octavia E. Butler", Some("Fiction"), Some("1979")))
            .await
            .unwrap();

        let only_genre = BookForm {
            genre: Some("Science Fiction".to_string()),
            ..Default::default()
        };
        let updated = catalog.update_book(created.id, &only_genre).await.unwrap();
        assert_eq!(updated.title, "Kindred");
        assert_eq!(updated.author, "Octavia E. Butler");
        assert_eq!(updated.genre.as_deref(), Some("Science Fiction"));
        assert_eq!(updated.year, Some(1979));

        // An empty value still clears an optional field
        let cleared = catalog
            .update_book(created.id, &form("Kindred", "Octavia E. Butler", Some(""), Some("")))
            .await
            .unwrap();
        assert_eq!(cleared.genre, None);
        assert_eq!(cleared.year, None);
    }

    #[tokio::test]
    async fn rejected_update_keeps_stored_record() {
        let catalog = service();
        let created = catalog
            .create_book(&form("Beloved", "Toni Morrison", None, None))
            .await
            .unwrap();

        let err = catalog
            .update_book(created.id, &form("", "Toni Morrison", None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref f) if f.draft.id == Some(created.id)));
        assert_eq!(catalog.get_book(created.id).await.unwrap().title, "Beloved");
    }

    #[tokio::test]
    async fn update_of_unknown_book_is_not_found() {
        let catalog = service();
        let err = catalog
            .update_book(5, &form("A", "B", None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // Existence is checked before the submission is validated
        let err = catalog
            .update_book(5, &form("", "", None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let catalog = service();
        let created = catalog
            .create_book(&form("Solaris", "Stanislaw Lem", None, None))
            .await
            .unwrap();

        catalog.delete_book(created.id).await.unwrap();
        assert!(matches!(
            catalog.get_book(created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            catalog.delete_book(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn author_search_finds_single_record() {
        let catalog = service();
        catalog
            .create_book(&form("Solaris", "Stanislaw Lem", None, None))
            .await
            .unwrap();
        let target = catalog
            .create_book(&form("Piranesi", "Susanna Clarke", None, None))
            .await
            .unwrap();

        let hits = catalog.search_books("Clarke").await.unwrap();
        assert_eq!(hits, vec![target]);
    }
}
