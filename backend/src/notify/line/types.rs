use serde::Serialize;

/// Body of `POST /v2/bot/message/push`.
#[derive(Debug, Serialize)]
pub struct PushRequest<'a> {
    pub to: &'a str,
    pub messages: Vec<TextMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TextMessage<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'a str,
}

impl<'a> PushRequest<'a> {
    pub fn text(to: &'a str, text: &'a str) -> Self {
        Self {
            to,
            messages: vec![TextMessage { kind: "text", text }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_push_api_shape() {
        let body = serde_json::to_value(PushRequest::text("U1", "hello")).unwrap();

        assert_eq!(
            body,
            serde_json::json!({ "to": "U1", "messages": [{ "type": "text", "text": "hello" }] })
        );
    }
}
