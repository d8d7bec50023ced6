use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::state::WebhookState;
use super::types::WebhookBody;

/// Reply pushed to whoever messages the bot.
pub const ECHO_TEXT: &str = "📢 RCI通知テスト：Webhookから LINE 通知成功！";

pub fn router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route("/webhook", post(webhook))
        .route("/health", get(health))
        .with_state(state)
}

/// POST /webhook: always acknowledges with `200 OK`.
///
/// The raw body is taken so that a malformed payload still starts the
/// scheduler and still gets a 200; the platform retries anything else.
async fn webhook(State(state): State<Arc<WebhookState>>, body: Bytes) -> (StatusCode, &'static str) {
    if state.trigger.on_first_event() {
        info!("monitoring loop started by first webhook event");
    }

    let payload: WebhookBody = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, bytes = body.len(), "unparseable webhook body");
            return (StatusCode::OK, "OK");
        }
    };

    debug!(events = payload.events.len(), "webhook received");

    for sender in payload.events.iter().filter_map(|e| e.message_sender()) {
        match state.notifier.push(sender, ECHO_TEXT).await {
            Ok(outcome) => info!(status = outcome.status, "echo pushed"),
            Err(e) => warn!(error = %e, "echo push failed"),
        }
    }

    (StatusCode::OK, "OK")
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
