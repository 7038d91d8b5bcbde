//! Answer service implementations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use watchtalk_core::{AnswerError, AnswerRequest, AnswerService, Settings};

use crate::error::VoiceError;
use crate::messages::placeholder_answer;

// ── Placeholder ────────────────────────────────────────────────────

/// Echoes the question back in a templated sentence.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderAnswerService {
    latency: Duration,
}

impl PlaceholderAnswerService {
    pub const fn new() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    /// Simulate a slow backend.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl AnswerService for PlaceholderAnswerService {
    async fn resolve(&self, request: &AnswerRequest) -> Result<String, AnswerError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(placeholder_answer(
            request.question(),
            request.context_label(),
        ))
    }
}

// ── HTTP ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AnswerResponse {
    answer: String,
}

/// POSTs the request as JSON and reads `{ "answer": "..." }` back.
#[derive(Debug, Clone)]
pub struct HttpAnswerService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnswerService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, VoiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("watchtalk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VoiceError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn resolve(&self, request: &AnswerRequest) -> Result<String, AnswerError> {
        tracing::debug!(endpoint = %self.endpoint, video = request.context_id(), "Requesting answer");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Err(AnswerError::Unavailable(status.to_string()));
        }
        if !status.is_success() {
            return Err(AnswerError::Transport(format!("HTTP {status}")));
        }

        let body: AnswerResponse = response
            .json()
            .await
            .map_err(|e| AnswerError::InvalidResponse(e.to_string()))?;

        let answer = body.answer.trim();
        if answer.is_empty() {
            return Err(AnswerError::InvalidResponse("empty answer".to_string()));
        }
        Ok(answer.to_string())
    }
}

fn map_transport_error(e: reqwest::Error) -> AnswerError {
    if e.is_timeout() {
        AnswerError::Timeout
    } else {
        AnswerError::Transport(e.to_string())
    }
}

/// The HTTP service when an endpoint is configured, the placeholder otherwise.
pub fn answer_service_from_settings(
    settings: &Settings,
) -> Result<Arc<dyn AnswerService>, VoiceError> {
    match settings.answer_endpoint.as_deref() {
        Some(endpoint) => {
            tracing::info!(%endpoint, "Using HTTP answer service");
            Ok(Arc::new(HttpAnswerService::new(
                endpoint,
                settings.effective_answer_timeout(),
            )?))
        }
        None => Ok(Arc::new(PlaceholderAnswerService::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and return the request body.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/answer", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut received = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                received.extend_from_slice(&buf[..n]);
                if let Some(request) = complete_request(&received) {
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    socket.write_all(response.as_bytes()).await.unwrap();
                    socket.shutdown().await.unwrap();
                    return request;
                }
                if n == 0 {
                    return String::new();
                }
            }
        });
        (endpoint, handle)
    }

    fn complete_request(raw: &[u8]) -> Option<String> {
        let text = std::str::from_utf8(raw).ok()?;
        let (head, body) = text.split_once("\r\n\r\n")?;
        let length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        (body.len() >= length).then(|| body.to_string())
    }

    fn request() -> AnswerRequest {
        AnswerRequest::new("what is this video about", "abc", "Rust in 100 Seconds")
    }

    #[test]
    fn placeholder_answers_immediately() {
        let service = PlaceholderAnswerService::new();
        let answer = tokio_test::block_on(service.resolve(&request())).unwrap();
        assert_eq!(
            answer,
            "Based on the video \"Rust in 100 Seconds\", I understand you asked: \"what is this video about\". This feature is currently being developed."
        );
    }

    #[tokio::test]
    async fn http_service_posts_request_and_reads_answer() {
        let (endpoint, server) = serve_once("200 OK", r#"{"answer":" This video explains X "}"#).await;
        let service = HttpAnswerService::new(endpoint, Duration::from_secs(5)).unwrap();

        let answer = service.resolve(&request()).await.unwrap();
        assert_eq!(answer, "This video explains X");

        let body: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(body["question"], "what is this video about");
        assert_eq!(body["contextId"], "abc");
        assert_eq!(body["contextLabel"], "Rust in 100 Seconds");
    }

    #[tokio::test]
    async fn http_service_rejects_malformed_body() {
        let (endpoint, _server) = serve_once("200 OK", r#"{"text":"nope"}"#).await;
        let service = HttpAnswerService::new(endpoint, Duration::from_secs(5)).unwrap();

        let err = service.resolve(&request()).await.unwrap_err();
        assert!(matches!(err, AnswerError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn http_service_maps_server_errors() {
        let (endpoint, _server) = serve_once("500 Internal Server Error", "{}").await;
        let service = HttpAnswerService::new(endpoint, Duration::from_secs(5)).unwrap();
        assert!(matches!(
            service.resolve(&request()).await,
            Err(AnswerError::Transport(_))
        ));

        let (endpoint, _server) = serve_once("503 Service Unavailable", "{}").await;
        let service = HttpAnswerService::new(endpoint, Duration::from_secs(5)).unwrap();
        assert!(matches!(
            service.resolve(&request()).await,
            Err(AnswerError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn http_service_rejects_empty_answer() {
        let (endpoint, _server) = serve_once("200 OK", r#"{"answer":"   "}"#).await;
        let service = HttpAnswerService::new(endpoint, Duration::from_secs(5)).unwrap();
        assert!(matches!(
            service.resolve(&request()).await,
            Err(AnswerError::InvalidResponse(_))
        ));
    }

    #[test]
    fn settings_choose_service() {
        let settings = Settings::with_defaults();
        assert!(answer_service_from_settings(&settings).is_ok());

        let settings = Settings {
            answer_endpoint: Some("http://localhost:8080/answer".to_string()),
            ..Settings::with_defaults()
        };
        assert!(answer_service_from_settings(&settings).is_ok());
    }
}
