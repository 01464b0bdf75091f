use serde::Serialize;
use serde_json::Value;

/// Body of every outbound chat request.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub content: &'a str,
}

/// Pull the reply text out of a 200 response body.
/// Prefers `message`, then `response`; anything else is treated as plain text.
pub fn extract_reply(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => json
            .get("message")
            .and_then(|v| v.as_str())
            .or_else(|| json.get("response").and_then(|v| v.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| {
                log::debug!("reply JSON has no message/response field, using raw body");
                body.to_string()
            }),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_content_only() {
        let body = serde_json::to_string(&ChatRequest { content: "hola" }).unwrap();
        assert_eq!(body, r#"{"content":"hola"}"#);
    }

    #[test]
    fn prefers_message_field() {
        let body = r#"{"message": "first", "response": "second"}"#;
        assert_eq!(extract_reply(body), "first");
    }

    #[test]
    fn falls_back_to_response_field() {
        assert_eq!(extract_reply(r#"{"response": "second"}"#), "second");
    }

    #[test]
    fn non_string_message_falls_through_to_response() {
        assert_eq!(extract_reply(r#"{"message": 3, "response": "ok"}"#), "ok");
    }

    #[test]
    fn json_without_fields_returns_raw_body() {
        let body = r#"{"status": "ok"}"#;
        assert_eq!(extract_reply(body), body);
    }

    #[test]
    fn plain_text_body_is_the_reply() {
        assert_eq!(extract_reply("Hola, ¿en qué te ayudo?"), "Hola, ¿en qué te ayudo?");
    }

    #[test]
    fn empty_body_is_empty_reply() {
        assert_eq!(extract_reply(""), "");
    }
}
