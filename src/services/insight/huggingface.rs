//! HuggingFace Inference Providers backend.
//!
//! Uses the router's OpenAI-compatible `/v1/chat/completions` endpoint with a
//! single user message.

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::generation::{GenerationError, GenerativeBackend};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

pub struct HuggingFaceBackend {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl HuggingFaceBackend {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn extract_content(response: ChatResponse) -> Result<String, GenerationError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Malformed("response has no choices".to_string()))?;

        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(GenerationError::EmptyContent),
        }
    }
}

#[async_trait::async_trait]
impl GenerativeBackend for HuggingFaceBackend {
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/v1/chat/completions", self.api_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        Self::extract_content(parsed)
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InsightResult;
    use crate::services::insight::generation::{GenerationClient, SHOW_FALLBACK};
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn spawn_stub_router(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn backend_for(url: String) -> HuggingFaceBackend {
        HuggingFaceBackend::new(
            "hf_test".to_string(),
            url,
            "test-model".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_complete_sends_chat_request() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer hf_test");
                assert_eq!(body["model"], "test-model");
                assert_eq!(body["max_tokens"], 500);
                assert_eq!(body["messages"][0]["role"], "user");
                let content = body["messages"][0]["content"].as_str().unwrap().to_string();
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": format!("echo: {}", content)}}]
                }))
            }),
        );
        let backend = backend_for(spawn_stub_router(app).await);

        let raw = backend.complete("hello", 500, 0.7).await.unwrap();
        assert_eq!(raw, "echo: hello");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad token") }),
        );
        let backend = backend_for(spawn_stub_router(app).await);

        let err = backend.complete("hello", 500, 0.7).await.unwrap_err();
        assert!(matches!(err, GenerationError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_reported() {
        let app = Router::new().route("/v1/chat/completions", post(|| async { "not json" }));
        let backend = backend_for(spawn_stub_router(app).await);

        let err = backend.complete("hello", 500, 0.7).await.unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let backend = backend_for("http://127.0.0.1:9".to_string());
        let err = backend.complete("hello", 500, 0.7).await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out_into_fallback() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({"choices": [{"message": {"content": "too late"}}]}))
            }),
        );
        let url = spawn_stub_router(app).await;
        let short_timeout = || {
            HuggingFaceBackend::new(
                "hf_test".to_string(),
                url.clone(),
                "test-model".to_string(),
                Duration::from_millis(200),
            )
            .unwrap()
        };

        let err = short_timeout().complete("hello", 500, 0.7).await.unwrap_err();
        match err {
            GenerationError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {:?}", other),
        }

        let client = GenerationClient::new(Some(Arc::new(short_timeout())));
        let started = std::time::Instant::now();
        let result = client
            .generate("Write a single compelling insight about the TV show 'Lost'.")
            .await;

        assert_eq!(result, InsightResult::fallback(SHOW_FALLBACK));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn test_extract_content_rejects_missing_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            HuggingFaceBackend::extract_content(response),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_extract_content_rejects_null_content() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(matches!(
            HuggingFaceBackend::extract_content(response),
            Err(GenerationError::EmptyContent)
        ));
    }
}
