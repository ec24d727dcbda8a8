use log::debug;
use serde::Deserialize;
use serde_json::json;

use dxvar_core::errors::UpstreamError;
use dxvar_core::services::{Assistant, ChatMessage};

use super::config::AssistantConfig;
use super::consts::GROQ_SERVICE;
use super::http::HttpClient;
use super::utils::join_url;

const COMPLETIONS_PATH: &str = "openai/v1/chat/completions";

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Text of the first choice of a chat completion.
pub fn decode_reply(body: &str) -> Result<String, UpstreamError> {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| UpstreamError::malformed(GROQ_SERVICE, e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| UpstreamError::malformed(GROQ_SERVICE, "completion has no content"))
}

/// Chat completions from Groq's OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct GroqAssistant {
    http: HttpClient,
    api: String,
    api_key: String,
    settings: AssistantConfig,
}

impl GroqAssistant {
    pub fn new(
        http: HttpClient,
        api: impl Into<String>,
        api_key: impl Into<String>,
        settings: AssistantConfig,
    ) -> Self {
        GroqAssistant {
            http,
            api: api.into(),
            api_key: api_key.into(),
            settings,
        }
    }

    fn request_body(&self, messages: &[ChatMessage]) -> serde_json::Value {
        json!({
            "model": self.settings.model,
            "messages": messages,
            "temperature": self.settings.temperature,
            "max_completion_tokens": self.settings.max_completion_tokens,
            "top_p": self.settings.top_p,
            "stream": false,
        })
    }
}

impl Assistant for GroqAssistant {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, UpstreamError> {
        let url = join_url(&self.api, COMPLETIONS_PATH);
        debug!(
            "Groq completion with {} message(s) on {}",
            messages.len(),
            self.settings.model
        );

        let body = self.request_body(messages);
        let response = self
            .http
            .post_json(GROQ_SERVICE, &url, &body, Some(&self.api_key))?
            .error_for_status(GROQ_SERVICE)?;

        decode_reply(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::config::HttpConfig;

    #[rstest]
    fn test_decode_reply() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  LPA variants raise Lp(a).\n"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 6}
        }"#;

        assert_eq!(decode_reply(body).unwrap(), "LPA variants raise Lp(a).");
    }

    #[rstest]
    #[case(r#"{"choices": []}"#)]
    #[case(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#)]
    #[case(r#"{"error": {"message": "invalid api key"}}"#)]
    fn test_unusable_replies_are_malformed(#[case] body: &str) {
        assert!(matches!(
            decode_reply(body),
            Err(UpstreamError::Malformed { .. })
        ));
    }

    #[rstest]
    fn test_request_body_carries_settings() {
        let http = HttpClient::new(&HttpConfig::default()).unwrap();
        let assistant = GroqAssistant::new(http, "https://api.groq.com", "key", AssistantConfig::default());

        let body = assistant.request_body(&[
            ChatMessage::system("be brief"),
            ChatMessage::user("rs1234?"),
        ]);

        assert_eq!(body["model"], "llama-3.3-70b-versatile");
        assert_eq!(body["max_completion_tokens"], 1024);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "rs1234?");
    }
}
