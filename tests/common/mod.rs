use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{ IntoResponse, Response };
use axum::routing::{ get, post };
use axum::{ Json, Router };
use serde_json::{ json, Value };
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::sync::{ Arc, Mutex };
use std::time::Duration;

/// How the fake assistant answers `POST /api/chat`.
#[derive(Clone, Copy, Debug)]
pub enum Behavior {
    Echo,
    ServerError,
    NotJson,
    MissingField,
    Slow(Duration),
}

#[derive(Clone)]
pub struct Backend {
    behavior: Behavior,
    pub hits: Arc<AtomicUsize>,
    pub bodies: Arc<Mutex<Vec<Value>>>,
}

impl Backend {
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn chat(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    backend.bodies.lock().unwrap().push(body.clone());
    let prompt = body["prompt"].as_str().unwrap_or_default().to_string();

    match backend.behavior {
        Behavior::Echo => Json(json!({ "response": format!("You asked: {}", prompt) })).into_response(),
        Behavior::ServerError =>
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An internal server error occurred" })),
            ).into_response(),
        Behavior::NotJson => "definitely not json".into_response(),
        Behavior::MissingField => Json(json!({ "answer": prompt })).into_response(),
        Behavior::Slow(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({ "response": "too late" })).into_response()
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "chat-api" }))
}

/// Serves the fake assistant on an ephemeral port and returns the chat URL.
pub async fn spawn_backend(behavior: Behavior) -> (String, Backend) {
    let backend = Backend {
        behavior,
        hits: Arc::new(AtomicUsize::new(0)),
        bodies: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/api/chat", post(chat))
        .route("/api/health", get(health))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/chat", addr), backend)
}

/// A URL on which nothing is listening.
pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api/chat", addr)
}
