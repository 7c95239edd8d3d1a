//! Fake remote list document served over HTTP for integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

pub const API_KEY: &str = "test-api-key";

#[derive(Debug)]
struct Document {
    body: String,
    get_status: StatusCode,
    put_status: StatusCode,
    puts: Vec<HashMap<String, String>>,
}

/// Handle to a running fake document server.
#[derive(Clone)]
pub struct FakeDocumentServer {
    pub addr: SocketAddr,
    doc: Arc<Mutex<Document>>,
}

impl FakeDocumentServer {
    /// Start a server on an ephemeral loopback port serving `body` at `/buyers`.
    pub async fn start(body: &str) -> Self {
        let doc = Arc::new(Mutex::new(Document {
            body: body.to_string(),
            get_status: StatusCode::OK,
            put_status: StatusCode::OK,
            puts: Vec::new(),
        }));

        let router = Router::new()
            .route("/buyers", get(read_document).put(write_document))
            .with_state(doc.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, doc }
    }

    pub fn url(&self) -> String {
        format!("http://{}/buyers", self.addr)
    }

    pub fn body(&self) -> String {
        self.doc.lock().unwrap().body.clone()
    }

    pub fn entries(&self) -> Vec<String> {
        serde_json::from_str(&self.body()).unwrap()
    }

    pub fn set_get_status(&self, status: StatusCode) {
        self.doc.lock().unwrap().get_status = status;
    }

    pub fn set_put_status(&self, status: StatusCode) {
        self.doc.lock().unwrap().put_status = status;
    }

    /// Query parameters of every accepted or rejected PUT, in order.
    pub fn put_queries(&self) -> Vec<HashMap<String, String>> {
        self.doc.lock().unwrap().puts.clone()
    }
}

type SharedDocument = Arc<Mutex<Document>>;

async fn read_document(State(doc): State<SharedDocument>) -> (StatusCode, String) {
    let doc = doc.lock().unwrap();
    (doc.get_status, doc.body.clone())
}

async fn write_document(
    State(doc): State<SharedDocument>,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> StatusCode {
    let mut doc = doc.lock().unwrap();
    doc.puts.push(query.clone());

    if doc.put_status != StatusCode::OK {
        return doc.put_status;
    }
    if query.get("apiKey").map(String::as_str) != Some(API_KEY) {
        return StatusCode::UNAUTHORIZED;
    }

    doc.body = body;
    StatusCode::OK
}
