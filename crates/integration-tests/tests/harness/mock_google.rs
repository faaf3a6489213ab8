//! Mock Google Cloud backend for integration tests
//!
//! Impersonates Speech-to-Text, Translation, Text-to-Speech and the OAuth
//! token endpoint, recording every request it sees.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    },
};

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

pub const ACCESS_TOKEN: &str = "mock-access-token";

/// Canned answers of the mock
pub struct MockResponses {
    /// One recognition segment per entry
    pub transcripts: Vec<String>,
    pub translation: String,
    pub audio: Vec<u8>,
    /// Fail recognition with this status instead of answering
    pub speech_status: Option<StatusCode>,
    /// Fail synthesis with this status instead of answering
    pub tts_status: Option<StatusCode>,
}

impl Default for MockResponses {
    fn default() -> Self {
        Self {
            transcripts: vec!["good morning".to_owned()],
            translation: "सुप्रभात".to_owned(),
            audio: b"ID3 hindi speech".to_vec(),
            speech_status: None,
            tts_status: None,
        }
    }
}

/// A recorded upstream request
#[derive(Debug, Clone)]
pub struct Recorded {
    pub body: Value,
    pub authorization: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Default)]
struct Counters {
    speech: AtomicU32,
    translate: AtomicU32,
    tts: AtomicU32,
    token: AtomicU32,
}

struct MockState {
    responses: MockResponses,
    counters: Counters,
    speech: Mutex<Vec<Recorded>>,
    translate: Mutex<Vec<Recorded>>,
    tts: Mutex<Vec<Recorded>>,
    assertions: Mutex<Vec<String>>,
}

/// Mock Google backend on a random local port
pub struct MockGoogle {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockGoogle {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(MockResponses::default()).await
    }

    pub async fn start_with(responses: MockResponses) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            responses,
            counters: Counters::default(),
            speech: Mutex::default(),
            translate: Mutex::default(),
            tts: Mutex::default(),
            assertions: Mutex::default(),
        });

        let app = Router::new()
            .route("/speech/v1/speech:recognize", routing::post(handle_recognize))
            .route("/translate/v2", routing::post(handle_translate))
            .route("/tts/v1/text:synthesize", routing::post(handle_synthesize))
            .route("/token", routing::post(handle_token))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn speech_count(&self) -> u32 {
        self.state.counters.speech.load(Ordering::Relaxed)
    }

    pub fn translate_count(&self) -> u32 {
        self.state.counters.translate.load(Ordering::Relaxed)
    }

    pub fn tts_count(&self) -> u32 {
        self.state.counters.tts.load(Ordering::Relaxed)
    }

    pub fn token_count(&self) -> u32 {
        self.state.counters.token.load(Ordering::Relaxed)
    }

    /// Total calls to the three services, tokens excluded
    pub fn service_calls(&self) -> u32 {
        self.speech_count() + self.translate_count() + self.tts_count()
    }

    pub fn speech_requests(&self) -> Vec<Recorded> {
        self.state.speech.lock().unwrap().clone()
    }

    pub fn translate_requests(&self) -> Vec<Recorded> {
        self.state.translate.lock().unwrap().clone()
    }

    pub fn tts_requests(&self) -> Vec<Recorded> {
        self.state.tts.lock().unwrap().clone()
    }

    /// JWT assertions presented to the token endpoint
    pub fn assertions(&self) -> Vec<String> {
        self.state.assertions.lock().unwrap().clone()
    }
}

impl Drop for MockGoogle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn record(headers: &HeaderMap, body: Value) -> Recorded {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
    };

    Recorded {
        body,
        authorization: header("authorization"),
        api_key: header("x-goog-api-key"),
    }
}

async fn handle_recognize(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.counters.speech.fetch_add(1, Ordering::Relaxed);
    state.speech.lock().unwrap().push(record(&headers, body));

    if let Some(status) = state.responses.speech_status {
        return (status, Json(json!({"error": {"code": status.as_u16(), "message": "mock failure"}}))).into_response();
    }

    if state.responses.transcripts.is_empty() {
        // the real service omits `results` when nothing was recognized
        return Json(json!({"totalBilledTime": "1s"})).into_response();
    }

    let results: Vec<Value> = state
        .responses
        .transcripts
        .iter()
        .map(|transcript| json!({"alternatives": [{"transcript": transcript, "confidence": 0.93}]}))
        .collect();

    Json(json!({ "results": results })).into_response()
}

async fn handle_translate(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.counters.translate.fetch_add(1, Ordering::Relaxed);
    state.translate.lock().unwrap().push(record(&headers, body));

    Json(json!({
        "data": {
            "translations": [{
                "translatedText": state.responses.translation,
                "detectedSourceLanguage": "en"
            }]
        }
    }))
}

async fn handle_synthesize(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.counters.tts.fetch_add(1, Ordering::Relaxed);
    state.tts.lock().unwrap().push(record(&headers, body));

    if let Some(status) = state.responses.tts_status {
        return (status, Json(json!({"error": {"code": status.as_u16(), "message": "mock failure"}}))).into_response();
    }

    Json(json!({ "audioContent": STANDARD.encode(&state.responses.audio) })).into_response()
}

async fn handle_token(
    State(state): State<Arc<MockState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.counters.token.fetch_add(1, Ordering::Relaxed);

    let grant_ok = form.get("grant_type").map(String::as_str) == Some("urn:ietf:params:oauth:grant-type:jwt-bearer");
    let Some(assertion) = form.get("assertion").filter(|_| grant_ok) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_grant"}))).into_response();
    };

    state.assertions.lock().unwrap().push(assertion.clone());

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3599
    }))
    .into_response()
}
