//! End-to-end flows: core services wired to the in-memory fake backend.

use std::sync::Arc;

use taskdeck_core::domain::{Category, NewTask, TaskId};
use taskdeck_core::ports::TokenStore;
use taskdeck_core::session::{AuthPhase, AuthToken, SessionManager};
use taskdeck_core::view::CategoryFilter;
use taskdeck_core::{ApiError, ClientError, TaskBoard};

use crate::gateway::MemoryBackend;
use crate::token::InMemoryTokenStore;

fn session_over(
    backend: Arc<MemoryBackend>,
    tokens: Arc<InMemoryTokenStore>,
) -> SessionManager {
    SessionManager::new(backend, tokens)
}

async fn registered_board(backend: Arc<MemoryBackend>) -> (SessionManager, TaskBoard) {
    let tokens = Arc::new(InMemoryTokenStore::new());
    let mut session = session_over(backend.clone(), tokens);
    session
        .register("Ana", "ana@example.test", "longenough")
        .await
        .unwrap();

    let board = TaskBoard::new(backend, session.token().cloned());
    (session, board)
}

#[tokio::test]
async fn test_register_create_toggle_delete_flow() {
    let backend = Arc::new(MemoryBackend::new());
    let (session, mut board) = registered_board(backend).await;
    assert!(session.is_authenticated());

    let created = board
        .create(NewTask::new("write the report").with_category(Category::Work))
        .await
        .unwrap();
    assert_eq!(board.visible_tasks().len(), 1);

    let toggled = board.toggle(created.id.clone()).await.unwrap();
    assert!(toggled.is_completed());
    assert!(board.page().unwrap().data[0].is_completed());

    board.delete(created.id).await.unwrap();
    assert!(board.visible_tasks().is_empty());
    assert_eq!(board.page().unwrap().total, 0);
}

#[tokio::test]
async fn test_deleting_sole_task_on_page_two_lands_on_page_one() {
    let backend = Arc::new(MemoryBackend::with_per_page(2));
    // Three tasks -> two pages; the oldest sits alone on page 2.
    let oldest = backend.seed_task("oldest", None, None);
    backend.seed_task("middle", None, None);
    backend.seed_task("newest", None, None);

    let (_session, mut board) = registered_board(backend).await;
    board.request_page(2);
    board.refresh().await.unwrap();
    assert_eq!(board.page().unwrap().data.len(), 1);

    board.delete(oldest).await.unwrap();

    let page = board.page().unwrap();
    assert_eq!(page.current_page, 1);
    assert_eq!(page.data.len(), 2);
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_creating_while_on_page_three_returns_to_page_one() {
    let backend = Arc::new(MemoryBackend::with_per_page(2));
    for i in 0..6 {
        backend.seed_task(&format!("task {}", i), None, None);
    }

    let (_session, mut board) = registered_board(backend).await;
    board.request_page(3);
    board.refresh().await.unwrap();
    assert_eq!(board.page().unwrap().current_page, 3);

    let created = board.create(NewTask::new("brand new")).await.unwrap();

    let page = board.page().unwrap();
    assert_eq!(page.current_page, 1);
    // Newest-first default ordering puts the new task on top of page 1.
    assert_eq!(page.data[0].id, created.id);
}

#[tokio::test]
async fn test_stale_stored_token_bootstraps_to_unauthenticated() {
    let backend = Arc::new(MemoryBackend::new());
    let tokens = Arc::new(InMemoryTokenStore::with_token(AuthToken::new("stale")));

    let mut session = session_over(backend, tokens.clone());
    session.bootstrap().await.unwrap();

    assert_eq!(session.phase(), AuthPhase::Unauthenticated);
    assert_eq!(tokens.load().unwrap(), None);
}

#[tokio::test]
async fn test_failed_login_surfaces_backend_message() {
    let backend = Arc::new(MemoryBackend::new());
    let mut session = session_over(backend, Arc::new(InMemoryTokenStore::new()));

    let err = session
        .login("nobody@example.test", "whatever1")
        .await
        .unwrap_err();

    match err {
        ClientError::Api(ApiError::Rejected { message, .. }) => {
            assert_eq!(
                message.as_deref(),
                Some("These credentials do not match our records.")
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(session.phase(), AuthPhase::Unauthenticated);
}

#[tokio::test]
async fn test_category_filter_drives_server_side_query() {
    let backend = Arc::new(MemoryBackend::with_per_page(10));
    backend.seed_task("report", Some("2025-06-01"), Some(Category::Work));
    backend.seed_task("groceries", None, Some(Category::Shopping));
    backend.seed_task("standup", Some("2025-05-01"), Some(Category::Work));

    let (_session, mut board) = registered_board(backend).await;
    board.set_filter(CategoryFilter::Only(Category::Work));
    board.refresh().await.unwrap();

    let visible = board.visible_tasks();
    assert_eq!(visible.len(), 2);
    // Due-date order within the filtered subset.
    assert_eq!(visible[0].title, "standup");
    assert_eq!(visible[1].title, "report");
    assert_eq!(board.page().unwrap().total, 2);
}

#[tokio::test]
async fn test_profile_updates_round_trip() {
    let backend = Arc::new(MemoryBackend::new());
    let tokens = Arc::new(InMemoryTokenStore::new());
    let mut session = session_over(backend.clone(), tokens);
    session
        .register("Ana", "ana@example.test", "longenough")
        .await
        .unwrap();

    let user = session.update_name("Ana Maria").await.unwrap();
    assert_eq!(user.name, "Ana Maria");

    let message = session
        .change_password("longenough", "evenlonger1", "evenlonger1")
        .await
        .unwrap();
    assert_eq!(message, "Password updated successfully.");

    // The old password no longer works, the new one does.
    let mut fresh = session_over(backend.clone(), Arc::new(InMemoryTokenStore::new()));
    assert!(fresh.login("ana@example.test", "longenough").await.is_err());
    fresh
        .login("ana@example.test", "evenlonger1")
        .await
        .unwrap();
    assert_eq!(fresh.user().unwrap().name, "Ana Maria");
}

#[tokio::test]
async fn test_deleting_missing_task_reports_not_found_and_clears_marker() {
    let backend = Arc::new(MemoryBackend::new());
    let (_session, mut board) = registered_board(backend).await;
    board.refresh().await.unwrap();

    let ghost = TaskId::Number(999);
    let err = board.delete(ghost.clone()).await.unwrap_err();

    assert_eq!(
        err.display_message("Failed to delete task. Please try again."),
        "Task not found."
    );
    assert!(!board.is_deleting(&ghost));
}
