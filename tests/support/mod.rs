//! In-process fake of the TrackIt REST API, bound to an ephemeral port.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::sync::Notify;

use trackit::config::Config;
use trackit::models::LoginForm;
use trackit::AppState;

pub const EMAIL: &str = "ana@trackit.dev";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "token-ana";

#[derive(Debug, Clone)]
pub struct FakeUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub image: String,
    pub password: String,
}

#[derive(Debug)]
pub struct FakeState {
    pub users: Vec<FakeUser>,
    pub habits: Vec<Value>,
    pub today: Vec<Value>,
    pub next_id: i64,
    pub accepted_token: String,

    pub login_status: Option<StatusCode>,
    pub sign_up_status: Option<StatusCode>,
    pub create_status: Option<StatusCode>,
    pub delete_status: Option<StatusCode>,
    pub toggle_status: Option<StatusCode>,
    pub today_status: Option<StatusCode>,

    /// When set, check/uncheck handlers park until notified.
    pub toggle_gate: Option<Arc<Notify>>,
    /// Same for habit create and delete.
    pub catalog_gate: Option<Arc<Notify>>,
    pub requests: Vec<String>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            users: vec![FakeUser {
                id: 1,
                email: EMAIL.into(),
                name: "Ana".into(),
                image: "https://img.example/ana.png".into(),
                password: PASSWORD.into(),
            }],
            habits: Vec::new(),
            today: Vec::new(),
            next_id: 1,
            accepted_token: TOKEN.into(),
            login_status: None,
            sign_up_status: None,
            create_status: None,
            delete_status: None,
            toggle_status: None,
            today_status: None,
            toggle_gate: None,
            catalog_gate: None,
            requests: Vec::new(),
        }
    }
}

type Shared = Arc<Mutex<FakeState>>;

pub struct FakeApi {
    pub base_url: String,
    state: Shared,
}

impl FakeApi {
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState::default()));
        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/sign-up", post(sign_up))
            .route("/habits", get(list_habits).post(create_habit))
            .route("/habits/today", get(list_today))
            .route("/habits/:id", delete(delete_habit))
            .route("/habits/:id/check", post(check))
            .route("/habits/:id/uncheck", post(uncheck))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn count(&self, request: &str) -> usize {
        self.with(|s| s.requests.iter().filter(|r| *r == request).count())
    }

    /// Polls until `request` has been received `n` times.
    pub async fn wait_for(&self, request: &str, n: usize) {
        for _ in 0..300 {
            if self.count(request) >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("never saw {n} x {request}");
    }

    pub fn app_state(&self, dir: &TempDir) -> AppState {
        AppState::new(Config {
            api_url: self.base_url.clone(),
            session_file: dir.path().join("session.json"),
            request_timeout_secs: 5,
            restore_delay_ms: 2000,
        })
        .unwrap()
    }

    /// An `AppState` that has already logged in as the seeded user.
    pub async fn logged_in(&self, dir: &TempDir) -> AppState {
        let state = self.app_state(dir);
        state
            .auth()
            .login(&LoginForm::new(EMAIL, PASSWORD))
            .await
            .unwrap();
        state
    }

    pub fn seed_habit(&self, name: &str, days: &[u8]) -> i64 {
        self.with(|s| {
            let id = s.next_id;
            s.next_id += 1;
            s.habits.push(json!({"id": id, "name": name, "days": days}));
            id
        })
    }
}

pub fn today_item(id: i64, name: &str, done: bool, current: u32, highest: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "done": done,
        "currentSequence": current,
        "highestSequence": highest,
    })
}

fn failure(status: StatusCode) -> Response {
    (status, Json(json!({"message": "fake failure"}))).into_response()
}

fn authorized(state: &FakeState, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", state.accepted_token);
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected)
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut st = state.lock().unwrap();
    st.requests.push("POST /auth/login".into());
    if let Some(status) = st.login_status {
        return failure(status);
    }
    let user = st
        .users
        .iter()
        .find(|u| body["email"] == u.email.as_str() && body["password"] == u.password.as_str());
    match user {
        Some(u) => Json(json!({
            "id": u.id,
            "name": u.name,
            "image": u.image,
            "email": u.email,
            "password": u.password,
            "token": st.accepted_token,
        }))
        .into_response(),
        None => failure(StatusCode::UNAUTHORIZED),
    }
}

async fn sign_up(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut st = state.lock().unwrap();
    st.requests.push("POST /auth/sign-up".into());
    if let Some(status) = st.sign_up_status {
        return failure(status);
    }
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if st.users.iter().any(|u| u.email == email) {
        return failure(StatusCode::UNAUTHORIZED);
    }
    let id = st.users.len() as i64 + 1;
    st.users.push(FakeUser {
        id,
        email,
        name: body["name"].as_str().unwrap_or_default().into(),
        image: body["image"].as_str().unwrap_or_default().into(),
        password: body["password"].as_str().unwrap_or_default().into(),
    });
    StatusCode::CREATED.into_response()
}

async fn list_habits(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut st = state.lock().unwrap();
    st.requests.push("GET /habits".into());
    if !authorized(&st, &headers) {
        return failure(StatusCode::UNAUTHORIZED);
    }
    Json(Value::Array(st.habits.clone())).into_response()
}

async fn create_habit(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let gate = {
        let mut st = state.lock().unwrap();
        st.requests.push("POST /habits".into());
        if !authorized(&st, &headers) {
            return failure(StatusCode::UNAUTHORIZED);
        }
        st.catalog_gate.clone()
    };
    if let Some(gate) = gate {
        gate.notified().await;
    }

    let mut st = state.lock().unwrap();
    if let Some(status) = st.create_status {
        return failure(status);
    }
    let id = st.next_id;
    st.next_id += 1;
    let habit = json!({"id": id, "name": body["name"], "days": body["days"]});
    st.habits.push(habit.clone());
    (StatusCode::CREATED, Json(habit)).into_response()
}

async fn delete_habit(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let gate = {
        let mut st = state.lock().unwrap();
        st.requests.push(format!("DELETE /habits/{id}"));
        if !authorized(&st, &headers) {
            return failure(StatusCode::UNAUTHORIZED);
        }
        st.catalog_gate.clone()
    };
    if let Some(gate) = gate {
        gate.notified().await;
    }

    let mut st = state.lock().unwrap();
    if let Some(status) = st.delete_status {
        return failure(status);
    }
    st.habits.retain(|h| h["id"] != id);
    StatusCode::OK.into_response()
}

async fn list_today(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut st = state.lock().unwrap();
    st.requests.push("GET /habits/today".into());
    if !authorized(&st, &headers) {
        return failure(StatusCode::UNAUTHORIZED);
    }
    if let Some(status) = st.today_status {
        return failure(status);
    }
    Json(Value::Array(st.today.clone())).into_response()
}

async fn check(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    mark(state, headers, id, true).await
}

async fn uncheck(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    mark(state, headers, id, false).await
}

async fn mark(state: Shared, headers: HeaderMap, id: i64, done: bool) -> Response {
    let gate = {
        let mut st = state.lock().unwrap();
        let action = if done { "check" } else { "uncheck" };
        st.requests.push(format!("POST /habits/{id}/{action}"));
        if !authorized(&st, &headers) {
            return failure(StatusCode::UNAUTHORIZED);
        }
        st.toggle_gate.clone()
    };
    if let Some(gate) = gate {
        gate.notified().await;
    }

    let mut st = state.lock().unwrap();
    if let Some(status) = st.toggle_status {
        return failure(status);
    }
    let Some(item) = st.today.iter_mut().find(|h| h["id"] == id) else {
        return failure(StatusCode::NOT_FOUND);
    };
    let current = item["currentSequence"].as_u64().unwrap_or(0);
    let highest = item["highestSequence"].as_u64().unwrap_or(0);
    let current = if done { current + 1 } else { current.saturating_sub(1) };
    item["done"] = json!(done);
    item["currentSequence"] = json!(current);
    item["highestSequence"] = json!(highest.max(current));
    StatusCode::OK.into_response()
}
