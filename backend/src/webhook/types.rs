use serde::Deserialize;

/// Inbound webhook payload. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub source: Option<EventSource>,
}

#[derive(Debug, Deserialize)]
pub struct EventSource {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl WebhookEvent {
    /// The sending user of a `message` event, if any.
    pub fn message_sender(&self) -> Option<&str> {
        if self.kind != "message" {
            return None;
        }
        self.source.as_ref()?.user_id.as_deref()
    }
}
