mod support;

use helpdesk_app::{SessionStatus, TicketWorkspace};
use helpdesk_core::{CoreError, FilterState, Priority, PriorityFilter, Scope, TicketId};

use support::{session_user, ticket, FakeStore};

fn populated_workspace() -> (FakeStore, TicketWorkspace<FakeStore>) {
    let store = FakeStore::new(session_user("1", "alice", false));
    store.push_ticket(ticket("t-1", "1", "Login Bug", "cannot sign in"));
    let workspace = TicketWorkspace::new(store.clone(), session_user("1", "alice", false));
    (store, workspace)
}

#[tokio::test]
async fn auth_denied_on_any_call_discards_every_cache() {
    let (store, mut workspace) = populated_workspace();
    workspace.refresh().await.expect("refresh");
    workspace
        .post_comment(&TicketId::from("t-1"), "note")
        .await
        .expect("post comment");
    workspace
        .set_priority(PriorityFilter::Only(Priority::High))
        .await
        .expect("set priority");
    workspace.draft_mut().title = "half-written".to_owned();

    store.fail_next(CoreError::AuthDenied);
    let error = workspace.refresh().await.expect_err("session expired");
    assert!(error.is_auth_denied());

    assert_eq!(workspace.session_status(), SessionStatus::RequiresLogin);
    assert!(workspace.snapshot().is_empty());
    assert!(workspace.visible_tickets().is_empty());
    assert!(workspace.comments(&TicketId::from("t-1")).is_none());
    assert_eq!(workspace.filter(), &FilterState::scoped(Scope::Mine));
    assert!(workspace.draft().title.is_empty());
}

#[tokio::test]
async fn auth_denied_during_a_comment_operation_also_resets() {
    let (store, mut workspace) = populated_workspace();
    workspace.refresh().await.expect("refresh");

    store.fail_next(CoreError::AuthDenied);
    workspace
        .post_comment(&TicketId::from("t-1"), "too late")
        .await
        .expect_err("session expired");
    assert_eq!(workspace.session_status(), SessionStatus::RequiresLogin);
    assert!(workspace.snapshot().is_empty());
}

#[tokio::test]
async fn recoverable_failures_do_not_clear_state() {
    let (store, mut workspace) = populated_workspace();
    workspace.refresh().await.expect("refresh");

    store.fail_next(CoreError::remote("flaky network"));
    workspace.refresh().await.expect_err("transient failure");

    assert_eq!(workspace.session_status(), SessionStatus::Active);
    assert_eq!(workspace.snapshot().len(), 1);
}

#[tokio::test]
async fn logout_ends_the_session_and_clears_state() {
    let (store, mut workspace) = populated_workspace();
    workspace.refresh().await.expect("refresh");

    workspace.logout().await;
    assert_eq!(workspace.session_status(), SessionStatus::RequiresLogin);
    assert!(workspace.snapshot().is_empty());
    assert!(store.calls().contains(&"logout".to_owned()));
}

#[tokio::test]
async fn logout_fails_open_when_the_remote_call_fails() {
    let (store, mut workspace) = populated_workspace();
    workspace.refresh().await.expect("refresh");

    store.fail_next(CoreError::remote("store unreachable"));
    workspace.logout().await;

    // the local session ends regardless of the remote outcome
    assert_eq!(workspace.session_status(), SessionStatus::RequiresLogin);
    assert!(workspace.snapshot().is_empty());
}
