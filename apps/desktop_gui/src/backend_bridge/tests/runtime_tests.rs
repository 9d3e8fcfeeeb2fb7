use super::*;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use client_core::UsersClient;
use crossbeam_channel::unbounded;
use shared::domain::{User, UserId};
use tokio::{net::TcpListener, sync::Mutex};

fn user(id: i64, name: &str) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase()),
        phone: None,
        address: None,
        password: "pw".to_string(),
        remember_token: None,
    }
}

#[derive(Default)]
struct FakeDirectory {
    users: StdMutex<Vec<User>>,
    calls: StdMutex<Vec<String>>,
}

impl FakeDirectory {
    fn with_users(users: Vec<User>) -> Self {
        Self {
            users: StdMutex::new(users),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("calls lock").push(call.into());
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.record("list");
        Ok(self.users.lock().expect("users lock").clone())
    }

    async fn get_user(&self, user_id: UserId) -> Result<User, ClientError> {
        self.record(format!("get {user_id}"));
        self.users
            .lock()
            .expect("users lock")
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| ClientError::Status {
                method: "GET",
                url: format!("http://fake/users/{user_id}"),
                status: StatusCode::NOT_FOUND,
            })
    }

    async fn update_user(&self, user: &User) -> Result<User, ClientError> {
        self.record(format!("update {}", user.id));
        let mut users = self.users.lock().expect("users lock");
        if let Some(slot) = users.iter_mut().find(|u| u.id == user.id) {
            *slot = user.clone();
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), ClientError> {
        self.record(format!("delete {user_id}"));
        self.users
            .lock()
            .expect("users lock")
            .retain(|u| u.id != user_id);
        Ok(())
    }
}

fn drain(rx: &crossbeam_channel::Receiver<UiEvent>) -> Vec<UiEvent> {
    rx.try_iter().collect()
}

#[tokio::test]
async fn list_command_emits_loaded_users() {
    let directory = FakeDirectory::with_users(vec![user(1, "Ada")]);
    let (tx, rx) = unbounded();

    handle_command(&directory, BackendCommand::ListUsers, &tx).await;

    assert_eq!(drain(&rx), vec![UiEvent::UsersLoaded(vec![user(1, "Ada")])]);
}

#[tokio::test]
async fn update_emits_updated_then_refreshes_the_list() {
    let directory = FakeDirectory::with_users(vec![user(1, "Ada"), user(2, "Grace")]);
    let (tx, rx) = unbounded();
    let mut edited = user(2, "Grace");
    edited.name = "Grace Brewster Hopper".to_string();

    handle_command(
        &directory,
        BackendCommand::UpdateUser {
            user: edited.clone(),
        },
        &tx,
    )
    .await;

    assert_eq!(directory.calls(), vec!["update 2", "list"]);
    assert_eq!(
        drain(&rx),
        vec![
            UiEvent::UserUpdated(edited.clone()),
            UiEvent::UsersLoaded(vec![user(1, "Ada"), edited]),
        ]
    );
}

#[tokio::test]
async fn delete_emits_deleted_then_refreshes_the_list() {
    let directory = FakeDirectory::with_users(vec![user(1, "Ada"), user(2, "Grace")]);
    let (tx, rx) = unbounded();

    handle_command(
        &directory,
        BackendCommand::DeleteUser { user_id: UserId(1) },
        &tx,
    )
    .await;

    assert_eq!(directory.calls(), vec!["delete 1", "list"]);
    assert_eq!(
        drain(&rx),
        vec![
            UiEvent::UserDeleted(UserId(1)),
            UiEvent::UsersLoaded(vec![user(2, "Grace")]),
        ]
    );
}

#[tokio::test]
async fn failed_lookup_is_reported_without_a_refresh() {
    let directory = FakeDirectory::default();
    let (tx, rx) = unbounded();

    handle_command(
        &directory,
        BackendCommand::FindUser { user_id: UserId(9) },
        &tx,
    )
    .await;

    assert_eq!(directory.calls(), vec!["get 9"]);
    let events = drain(&rx);
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        UiEvent::RequestFailed {
            operation: RequestKind::FindUser,
            ..
        }
    ));
}

#[tokio::test]
async fn failed_update_does_not_refresh_and_reports_the_operation() {
    let client = {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        UsersClient::new(&format!("http://{addr}")).expect("client")
    };
    let (tx, rx) = unbounded();

    handle_command(
        &client,
        BackendCommand::UpdateUser { user: user(1, "Ada") },
        &tx,
    )
    .await;

    let events = drain(&rx);
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        UiEvent::RequestFailed {
            operation: RequestKind::UpdateUser,
            ..
        }
    ));
}

#[derive(Clone, Default)]
struct RecordingServer {
    users: std::sync::Arc<Mutex<Vec<User>>>,
    requests: std::sync::Arc<Mutex<Vec<(Method, String, Option<serde_json::Value>)>>>,
    enveloped_put: bool,
}

async fn recorded_list(State(state): State<RecordingServer>) -> Json<Vec<User>> {
    state
        .requests
        .lock()
        .await
        .push((Method::GET, "/users".to_string(), None));
    Json(state.users.lock().await.clone())
}

async fn recorded_put(
    State(state): State<RecordingServer>,
    Path(user_id): Path<i64>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let json: serde_json::Value =
        serde_json::from_slice(&body).map_err(|_| StatusCode::BAD_REQUEST)?;
    state
        .requests
        .lock()
        .await
        .push((Method::PUT, format!("/users/{user_id}"), Some(json)));
    let updated: User = serde_json::from_slice(&body).map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut users = state.users.lock().await;
    for slot in users.iter_mut().filter(|u| u.id.0 == user_id) {
        *slot = updated.clone();
    }
    let reply = if state.enveloped_put {
        serde_json::json!({ "message": "User updated successfully", "data": updated })
    } else {
        serde_json::to_value(&updated).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
    };
    Ok(Json(reply))
}

async fn spawn_recording_server(server: RecordingServer) -> UsersClient {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/users", get(recorded_list))
        .route("/users/:user_id", axum::routing::put(recorded_put))
        .with_state(server);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    UsersClient::new(&format!("http://{addr}")).expect("client")
}

#[tokio::test]
async fn submitting_an_edit_sends_exactly_one_put_with_the_edited_fields() {
    let server = RecordingServer::default();
    server.users.lock().await.push(user(4, "Ada"));
    let client = spawn_recording_server(server.clone()).await;
    let (tx, rx) = unbounded();

    let mut page = crate::controller::reducer::UsersPageState::default();
    page.begin_edit(&user(4, "Ada"));
    page.set_draft_field(crate::controller::reducer::DraftField::Email, "ada@lovelace.org");
    let cmd = page.save_edit().expect("command");
    handle_command(&client, cmd, &tx).await;
    for event in drain(&rx) {
        page.apply(event);
    }

    let requests = server.requests.lock().await.clone();
    let puts: Vec<_> = requests
        .iter()
        .filter(|(method, _, _)| *method == Method::PUT)
        .collect();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].1, "/users/4");
    let body = puts[0].2.as_ref().expect("body");
    assert_eq!(body["email"], "ada@lovelace.org");
    assert_eq!(body["name"], "Ada");
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].0, Method::GET);
    assert_eq!(requests[1].1, "/users");

    assert!(!page.show_edit_modal);
    assert_eq!(page.users[0].email, "ada@lovelace.org");
}

#[tokio::test]
async fn enveloped_put_reply_still_closes_the_dialog_and_refreshes() {
    let server = RecordingServer {
        enveloped_put: true,
        ..RecordingServer::default()
    };
    server.users.lock().await.push(user(4, "Ada"));
    let client = spawn_recording_server(server.clone()).await;
    let (tx, rx) = unbounded();

    let mut page = crate::controller::reducer::UsersPageState::default();
    page.begin_edit(&user(4, "Ada"));
    page.set_draft_field(crate::controller::reducer::DraftField::Email, "new@example.org");
    let cmd = page.save_edit().expect("command");
    handle_command(&client, cmd, &tx).await;
    let events = drain(&rx);

    let mut expected = user(4, "Ada");
    expected.email = "new@example.org".to_string();
    assert_eq!(
        events,
        vec![
            UiEvent::UserUpdated(expected.clone()),
            UiEvent::UsersLoaded(vec![expected]),
        ]
    );
    for event in events {
        page.apply(event);
    }
    assert!(!page.show_edit_modal);
    assert_eq!(page.users[0].email, "new@example.org");

    let requests = server.requests.lock().await.clone();
    let paths: Vec<_> = requests
        .iter()
        .map(|(method, path, _)| (method.clone(), path.as_str()))
        .collect();
    assert_eq!(
        paths,
        vec![(Method::PUT, "/users/4"), (Method::GET, "/users")]
    );
}

#[test]
fn worker_announces_itself_and_drains_commands_in_queue_order() {
    let directory = Arc::new(FakeDirectory::with_users(vec![
        user(1, "Ada"),
        user(2, "Grace"),
    ]));
    let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(8);
    let (ui_tx, ui_rx) = unbounded();

    cmd_tx
        .send(BackendCommand::DeleteUser { user_id: UserId(1) })
        .expect("queue delete");
    cmd_tx.send(BackendCommand::ListUsers).expect("queue list");
    drop(cmd_tx);

    let handle = launch(directory.clone(), cmd_rx, ui_tx);
    handle.join().expect("worker exits once the queue closes");

    assert_eq!(directory.calls(), vec!["delete 1", "list", "list"]);
    assert_eq!(
        drain(&ui_rx),
        vec![
            UiEvent::Info("Backend worker ready".to_string()),
            UiEvent::UserDeleted(UserId(1)),
            UiEvent::UsersLoaded(vec![user(2, "Grace")]),
            UiEvent::UsersLoaded(vec![user(2, "Grace")]),
        ]
    );
}
