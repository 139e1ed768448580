#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Initialize tracing for tests with proper test output handling
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Canned answer for one request
#[derive(Debug, Clone)]
pub enum Reply {
    Json(StatusCode, String),
    Status(StatusCode),
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(status, body) => {
                (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
            Reply::Status(status) => status.into_response(),
        }
    }
}

/// An upload request as the server saw it
#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
struct StoredFile {
    key: String,
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

struct ServerState {
    configuration: Mutex<Reply>,
    configuration_gate: watch::Sender<bool>,
    configuration_requests: AtomicUsize,
    upload_replies: Mutex<VecDeque<Reply>>,
    uploads: Mutex<Vec<ReceivedUpload>>,
    files: Mutex<HashMap<String, StoredFile>>,
}

/// In-process stand-in for the transfer server, bound to an ephemeral port
pub struct FakeServer {
    pub base_url: String,
    state: Arc<ServerState>,
    task: JoinHandle<()>,
}

impl FakeServer {
    pub async fn start() -> Self {
        let state = Arc::new(ServerState {
            configuration: Mutex::new(configuration_reply(1_000_000, 7)),
            configuration_gate: watch::Sender::new(true),
            configuration_requests: AtomicUsize::new(0),
            upload_replies: Mutex::new(VecDeque::new()),
            uploads: Mutex::new(Vec::new()),
            files: Mutex::new(HashMap::new()),
        });

        let app = Router::new()
            .route("/api/configuration", get(configuration))
            .route("/api/files", post(upload))
            .route("/api/files/:id/download", post(download))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake server");
        let addr = listener.local_addr().expect("fake server address");
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake server");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            task,
        }
    }

    pub fn set_configuration(&self, reply: Reply) {
        *self.state.configuration.lock().unwrap() = reply;
    }

    /// Answer the next upload with `reply` instead of storing the file
    pub fn push_upload_reply(&self, reply: Reply) {
        self.state.upload_replies.lock().unwrap().push_back(reply);
    }

    /// Configuration requests wait until released
    pub fn hold_configuration(&self) {
        self.state.configuration_gate.send_replace(false);
    }

    pub fn release_configuration(&self) {
        self.state.configuration_gate.send_replace(true);
    }

    pub fn configuration_requests(&self) -> usize {
        self.state.configuration_requests.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<ReceivedUpload> {
        self.state.uploads.lock().unwrap().clone()
    }
}

impl Drop for FakeServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn configuration_reply(body_max_size: u64, days_file_available: u64) -> Reply {
    Reply::Json(
        StatusCode::OK,
        format!(
            r#"{{"BodyMaxSize":{},"DaysFileAvailable":{}}}"#,
            body_max_size, days_file_available
        ),
    )
}

async fn configuration(State(state): State<Arc<ServerState>>) -> Reply {
    state.configuration_requests.fetch_add(1, Ordering::SeqCst);
    let mut gate = state.configuration_gate.subscribe();
    let _ = gate.wait_for(|open| *open).await;
    state.configuration.lock().unwrap().clone()
}

async fn upload(State(state): State<Arc<ServerState>>, headers: HeaderMap, body: Bytes) -> Reply {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    };
    let received = ReceivedUpload {
        content_type: header_value(header::CONTENT_TYPE),
        content_disposition: header_value(header::CONTENT_DISPOSITION),
        body: body.to_vec(),
    };
    state.uploads.lock().unwrap().push(received.clone());

    if let Some(reply) = state.upload_replies.lock().unwrap().pop_front() {
        return reply;
    }

    let mut files = state.files.lock().unwrap();
    let n = files.len() + 1;
    let id = format!("file-{}", n);
    let key = format!("key-{}", n);
    let file_name = received
        .content_disposition
        .as_deref()
        .and_then(|value| value.strip_prefix("filename=\""))
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or("unnamed")
        .to_string();
    files.insert(
        id.clone(),
        StoredFile {
            key: key.clone(),
            file_name,
            mime_type: received
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            bytes: received.body,
        },
    );

    Reply::Json(
        StatusCode::OK,
        format!(r#"{{"id":"{}","key":"{}"}}"#, id, key),
    )
}

#[derive(Deserialize)]
struct DownloadBody {
    key: String,
}

async fn download(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(body): Json<DownloadBody>,
) -> Response {
    let files = state.files.lock().unwrap();
    let Some(file) = files.get(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if file.key != body.key {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.mime_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes.clone(),
    )
        .into_response()
}
