//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use bookshelf_server::{
    create_router, models::book::BookForm, repository::Repository, AppConfig, AppState,
};

pub fn test_server_for_repository(repository: Repository) -> (TestServer, AppState) {
    let state = AppState::new(AppConfig::default(), repository);
    let app = create_router(state.clone());
    let server = TestServer::new(app).expect("server");
    (server, state)
}

pub fn setup_test_server() -> (TestServer, AppState) {
    test_server_for_repository(Repository::in_memory())
}

/// Store `count` books titled "Book 0", "Book 1", ... in creation order
#[allow(dead_code)]
pub async fn seed_books(state: &AppState, count: usize) {
    for i in 0..count {
        let form = BookForm {
            title: Some(format!("Book {}", i)),
            author: Some(format!("Author {}", i)),
            genre: None,
            year: None,
        };
        state
            .services
            .catalog
            .create_book(&form)
            .await
            .expect("seed book");
    }
}
