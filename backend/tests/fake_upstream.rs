//! Local stand-ins for the chart API and the push API.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedPush {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct Upstream {
    pub chart_queries: Mutex<Vec<(String, String, String)>>,
    pub pushes: Mutex<Vec<RecordedPush>>,
    pub push_status: Mutex<u16>,
}

impl Upstream {
    pub fn pushes(&self) -> Vec<RecordedPush> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn chart_queries(&self) -> Vec<(String, String, String)> {
        self.chart_queries.lock().unwrap().clone()
    }

    pub fn set_push_status(&self, status: u16) {
        *self.push_status.lock().unwrap() = status;
    }
}

/// Starts the fake on an ephemeral port and returns its base URL.
pub async fn spawn() -> (String, Arc<Upstream>) {
    let upstream = Arc::new(Upstream {
        push_status: Mutex::new(200),
        ..Default::default()
    });

    let app = Router::new()
        .route("/v8/finance/chart/{ticker}", get(chart))
        .route("/v2/bot/message/push", post(push))
        .with_state(upstream.clone());

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), upstream)
}

async fn chart(
    State(upstream): State<Arc<Upstream>>,
    Path(ticker): Path<String>,
    Query(q): Query<std::collections::HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    upstream.chart_queries.lock().unwrap().push((
        ticker.clone(),
        q.get("interval").cloned().unwrap_or_default(),
        q.get("range").cloned().unwrap_or_default(),
    ));

    match ticker.as_str() {
        "JPY=X" => (
            StatusCode::OK,
            Json(json!({
                "chart": {
                    "result": [{
                        "meta": { "symbol": "JPY=X" },
                        "timestamp": [1700000120, 1700000000, 1700000060, 1700000180],
                        "indicators": { "quote": [{ "close": [150.3, 150.1, null, 150.4] }] }
                    }],
                    "error": null
                }
            })),
        ),
        "EMPTY=X" => (
            StatusCode::OK,
            Json(json!({
                "chart": {
                    "result": [{ "meta": {}, "indicators": { "quote": [{}] } }],
                    "error": null
                }
            })),
        ),
        "BROKEN=X" => (StatusCode::BAD_GATEWAY, Json(json!("upstream down"))),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "chart": {
                    "result": null,
                    "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
                }
            })),
        ),
    }
}

async fn push(
    State(upstream): State<Arc<Upstream>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    upstream.pushes.lock().unwrap().push(RecordedPush {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let status = *upstream.push_status.lock().unwrap();
    let status = StatusCode::from_u16(status).unwrap();
    if status.is_success() {
        (status, Json(json!({})))
    } else {
        (status, Json(json!({ "message": "Authentication failed" })))
    }
}
