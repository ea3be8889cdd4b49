//! In-process users collection server for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::models::{NewUser, User, UserId};

/// Shared in-memory collection behind `/users`
#[derive(Clone)]
pub struct MockCollection {
    users: Arc<Mutex<Vec<User>>>,
    next_id: Arc<AtomicU64>,
    hits: Arc<AtomicUsize>,
    failures: Arc<Mutex<(usize, u16)>>,
    create_delays: Arc<Mutex<HashMap<String, u64>>>,
}

impl Default for MockCollection {
    fn default() -> Self {
        Self::with_users(Vec::new())
    }
}

impl MockCollection {
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .filter_map(|u| match &u.id {
                UserId::Number(n) => n.as_u64(),
                UserId::Text(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        MockCollection {
            users: Arc::new(Mutex::new(users)),
            next_id: Arc::new(AtomicU64::new(next_id)),
            hits: Arc::new(AtomicUsize::new(0)),
            failures: Arc::new(Mutex::new((0, 500))),
            create_delays: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/users", get(list_users).post(create_user))
            .route("/users/{id}", delete(delete_user))
            .with_state(self.clone())
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    /// Total requests received, failed ones included
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Remove a user behind the client's back
    pub fn remove_user(&self, id: &UserId) {
        self.users.lock().unwrap().retain(|u| &u.id != id);
    }

    /// Answer the next `count` requests with `status`
    pub fn fail_next(&self, count: usize, status: u16) {
        *self.failures.lock().unwrap() = (count, status);
    }

    /// Hold the create response for `name` back by `ms`
    pub fn delay_create(&self, name: &str, ms: u64) {
        self.create_delays.lock().unwrap().insert(name.to_string(), ms);
    }

    fn hit(&self) -> Option<StatusCode> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let mut failures = self.failures.lock().unwrap();
        if failures.0 > 0 {
            failures.0 -= 1;
            return StatusCode::from_u16(failures.1).ok();
        }
        None
    }
}

async fn list_users(State(mock): State<MockCollection>) -> Response {
    if let Some(status) = mock.hit() {
        return status.into_response();
    }
    Json(mock.users()).into_response()
}

async fn create_user(State(mock): State<MockCollection>, Json(body): Json<NewUser>) -> Response {
    if let Some(status) = mock.hit() {
        return status.into_response();
    }

    let delay = mock.create_delays.lock().unwrap().get(&body.name).copied();
    if let Some(ms) = delay {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    let user = User::new(mock.next_id.fetch_add(1, Ordering::SeqCst), body.name);
    mock.users.lock().unwrap().push(user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn delete_user(State(mock): State<MockCollection>, Path(id): Path<String>) -> Response {
    if let Some(status) = mock.hit() {
        return status.into_response();
    }

    let id = match id.parse::<serde_json::Number>() {
        Ok(n) => UserId::Number(n),
        Err(_) => UserId::Text(id),
    };
    let mut users = mock.users.lock().unwrap();
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        Json(serde_json::json!({})).into_response()
    }
}

/// Router answering 200 with a body that is not JSON
pub fn malformed_router() -> Router {
    Router::new().route(
        "/users",
        get(|| async { "<html>oops</html>" }).post(|| async { "<html>oops</html>" }),
    )
}

/// Serve `router` on an ephemeral local port, returning its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
