//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, views};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.1.0",
        description = "Library catalog: views are JSON documents tagged by view name"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::search_books,
        books::new_book_form,
        books::create_book,
        books::edit_book_form,
        books::update_book,
        books::delete_book,
        books::page_not_found,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookForm,
            crate::models::book::BookDraft,
            crate::models::book::FieldError,
            views::BooksPage,
            views::BookFormPage,
            views::NotFoundPage,
            health::HealthResponse,
            health::ReadinessResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog views and forms")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
