//! Book catalog routes

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::book::{BookDraft, BookForm},
    AppState,
};

use super::{
    pagination::{self, ListQuery},
    views::{BookFormPage, BooksPage, NotFoundPage, View, BOOK_NOT_FOUND, PAGE_NOT_FOUND},
};

pub const BOOKS_PATH: &str = "/books";
pub const NOT_FOUND_PATH: &str = "/page-not-found";

#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Text searched in title, author, genre and year
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub query: Option<String>,
}

fn to_listing() -> Response {
    Redirect::to(BOOKS_PATH).into_response()
}

fn to_not_found() -> Response {
    Redirect::to(NOT_FOUND_PATH).into_response()
}

fn book_not_found(raw_id: &str) -> Response {
    tracing::warn!("Book {} not found", raw_id);
    View::not_found(BOOK_NOT_FOUND).into_response()
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

/// Redirect the home page to the listing
pub async fn home() -> Redirect {
    Redirect::to(BOOKS_PATH)
}

/// List books, newest first, one page at a time
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListQuery),
    responses(
        (status = 200, description = "Listing view", body = BooksPage),
        (status = 303, description = "Empty or malformed page, redirect to the not-found view")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Response> {
    let Some(page) = pagination::parse_page(query.page.as_deref()) else {
        tracing::warn!("Rejected listing page {:?}", query.page);
        return Ok(to_not_found());
    };
    let per_page = state.config.catalog.results_per_page.max(1);

    let books = state.services.catalog.list_books().await?;
    let visible = pagination::page_slice(&books, page, per_page);
    // Only a bare /books may show an empty listing
    if visible.is_empty() && query.page.is_some() {
        return Ok(to_not_found());
    }

    Ok(View::books(visible.to_vec(), books.len(), per_page, page).into_response())
}

/// Search books by title, author, genre or year
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "All matching books", body = BooksPage),
        (status = 303, description = "Empty query, redirect to the listing")
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Response> {
    let Some(query) = params.query.as_deref() else {
        return Ok(to_listing());
    };

    let books = state.services.catalog.search_books(query).await?;
    tracing::debug!("Search {:?} matched {} book(s)", query, books.len());
    let per_page = state.config.catalog.results_per_page.max(1);
    Ok(View::search_results(books, query, per_page).into_response())
}

/// Empty create form
#[utoipa::path(
    get,
    path = "/books/new",
    tag = "books",
    responses((status = 200, description = "Create form", body = BookFormPage))
)]
pub async fn new_book_form() -> View {
    View::new_book(BookDraft::default(), Vec::new())
}

/// Create a book from the submitted form
#[utoipa::path(
    post,
    path = "/books/new",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book created, redirect to the listing"),
        (status = 422, description = "Create form with the draft and field errors", body = BookFormPage)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.catalog.create_book(&form).await {
        Ok(_) => Ok(to_listing()),
        Err(AppError::Validation(failure)) => {
            Ok(View::new_book(failure.draft, failure.errors).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Edit form pre-filled from the stored book
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Edit form", body = BookFormPage),
        (status = 404, description = "Book not found", body = NotFoundPage)
    )
)]
pub async fn edit_book_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(book_not_found(&raw_id));
    };

    match state.services.catalog.get_book(id).await {
        Ok(book) => Ok(View::update_book(BookDraft::from(&book), Vec::new()).into_response()),
        Err(AppError::NotFound(_)) => Ok(book_not_found(&raw_id)),
        Err(e) => Err(e),
    }
}

/// Apply the submitted form to an existing book
#[utoipa::path(
    post,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book updated, redirect to the listing"),
        (status = 404, description = "Book not found", body = NotFoundPage),
        (status = 422, description = "Edit form with the draft and field errors", body = BookFormPage)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(book_not_found(&raw_id));
    };

    match state.services.catalog.update_book(id, &form).await {
        Ok(_) => Ok(to_listing()),
        Err(AppError::Validation(failure)) => {
            Ok(View::update_book(failure.draft, failure.errors).into_response())
        }
        Err(AppError::NotFound(_)) => Ok(book_not_found(&raw_id)),
        Err(e) => Err(e),
    }
}

/// Delete a book permanently
#[utoipa::path(
    post,
    path = "/books/{id}/delete",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Book deleted, redirect to the listing"),
        (status = 404, description = "Book not found", body = NotFoundPage)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(book_not_found(&raw_id));
    };

    match state.services.catalog.delete_book(id).await {
        Ok(()) => Ok(to_listing()),
        Err(AppError::NotFound(_)) => Ok(book_not_found(&raw_id)),
        Err(e) => Err(e),
    }
}

/// Not-found view, target of rejected listing pages
#[utoipa::path(
    get,
    path = "/page-not-found",
    tag = "books",
    responses((status = 404, description = "Not-found view", body = NotFoundPage))
)]
pub async fn page_not_found() -> View {
    View::not_found(PAGE_NOT_FOUND)
}

/// Fallback for unknown routes
pub async fn fallback() -> View {
    View::not_found(PAGE_NOT_FOUND)
}
