//! Named views and their data payloads.
//!
//! Templating is left to the client: a view is rendered as a JSON document tagged
//! with the view name, and its HTTP status follows from what the view shows.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::book::{Book, BookDraft, FieldError};

pub const BOOK_NOT_FOUND: &str = "Book Id Doesn't Exist";
pub const PAGE_NOT_FOUND: &str = "Page Not Found";

/// Listing of books
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BooksPage {
    pub title: String,
    pub books: Vec<Book>,
    /// Number of books in the whole listed set
    pub count: usize,
    pub results_per_page: usize,
    pub page: usize,
    /// Search text, when the listing holds search results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Create or edit form
#[derive(Debug, Serialize, ToSchema)]
pub struct BookFormPage {
    pub title: String,
    pub book: BookDraft,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotFoundPage {
    pub title: String,
    pub err: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "view")]
pub enum View {
    #[serde(rename = "books")]
    Books(BooksPage),
    #[serde(rename = "new-book")]
    NewBook(BookFormPage),
    #[serde(rename = "update-book")]
    UpdateBook(BookFormPage),
    #[serde(rename = "page-not-found")]
    NotFound(NotFoundPage),
}

impl View {
    pub fn books(books: Vec<Book>, count: usize, results_per_page: usize, page: usize) -> Self {
        View::Books(BooksPage {
            title: "Books".to_string(),
            books,
            count,
            results_per_page,
            page,
            query: None,
        })
    }

    pub fn search_results(books: Vec<Book>, query: &str, results_per_page: usize) -> Self {
        View::Books(BooksPage {
            title: format!("Search: {}", query),
            count: books.len(),
            books,
            results_per_page,
            page: 1,
            query: Some(query.to_string()),
        })
    }

    pub fn new_book(book: BookDraft, errors: Vec<FieldError>) -> Self {
        View::NewBook(BookFormPage {
            title: "New Book".to_string(),
            book,
            errors,
        })
    }

    pub fn update_book(book: BookDraft, errors: Vec<FieldError>) -> Self {
        View::UpdateBook(BookFormPage {
            title: "Update Book".to_string(),
            book,
            errors,
        })
    }

    pub fn not_found(err: &str) -> Self {
        View::NotFound(NotFoundPage {
            title: PAGE_NOT_FOUND.to_string(),
            err: err.to_string(),
        })
    }

    /// Status sent with the view
    pub fn status(&self) -> StatusCode {
        match self {
            View::NotFound(_) => StatusCode::NOT_FOUND,
            View::NewBook(form) | View::UpdateBook(form) if !form.errors.is_empty() => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
