//! HTTP routes for the Bookshelf catalog

pub mod books;
pub mod health;
pub mod openapi;
pub mod pagination;
pub mod views;

use axum::{routing::get, routing::post, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/", get(books::home))
        .route("/books", get(books::list_books))
        .route("/books/search", get(books::search_books))
        .route("/books/new", get(books::new_book_form).post(books::create_book))
        .route("/books/:id", get(books::edit_book_form).post(books::update_book))
        .route("/books/:id/delete", post(books::delete_book))
        .route(books::NOT_FOUND_PATH, get(books::page_not_found))
        .with_state(state);

    Router::new()
        .merge(catalog)
        .merge(openapi::create_openapi_router())
        .fallback(books::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
