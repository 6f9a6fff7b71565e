//! Gemini `generateContent` transport over reqwest.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::AppConfig;
use crate::error::GenerateError;
use crate::generator::prompt::GenerateContentRequest;
use crate::generator::{CompletionTransport, RawResponse};

pub struct GeminiTransport {
    http_client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiTransport {
    pub fn new(http_client: Client, config: &AppConfig) -> Self {
        Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Builds a client honouring the configured timeout, if any.
    pub fn from_config(config: &AppConfig) -> Result<Self, GenerateError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(builder.build()?, config))
    }

    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl CompletionTransport for GeminiTransport {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn send(&self, request: &GenerateContentRequest) -> Result<RawResponse, GenerateError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(GenerateError::MissingApiKey)?;

        let response = self
            .http_client
            .post(self.url())
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("generateContent returned HTTP {} ({} bytes)", status, body.len());

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::prompt::build_request;
    use crate::generator::IdeaGenerator;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers one HTTP request with `status` and `body`, returning the raw
    /// request it received.
    async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..n]);
                if let Some(end) = received.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&received[..end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if received.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&received).into_owned()
        });

        (format!("http://{addr}/v1beta/models"), handle)
    }

    fn local_transport(endpoint: String) -> GeminiTransport {
        let config = AppConfig {
            endpoint,
            api_key: Some("k3y".to_string()),
            ..AppConfig::default()
        };
        let client = Client::builder().no_proxy().build().unwrap();
        GeminiTransport::new(client, &config)
    }

    fn envelope_with_three_ideas() -> String {
        let idea = |name: &str| {
            json!({
                "coinName": name,
                "ticker": "FROG",
                "concept": "Leap to earn",
                "mascot": "A frog in sunglasses",
                "emoji": "🐸",
                "slogan": "Ribbit to riches",
                "communityVibe": "Damp"
            })
        };
        let payload = json!([idea("FrogCoin"), idea("Lilypad"), idea("Croak")]).to_string();
        json!({ "candidates": [{ "content": { "parts": [{ "text": payload }] } }] }).to_string()
    }

    #[test]
    fn test_url_joins_endpoint_and_model() {
        let config = AppConfig {
            endpoint: "https://example.test/v1beta/models/".to_string(),
            model: "gemini-test".to_string(),
            ..AppConfig::default()
        };
        let transport = GeminiTransport::new(Client::new(), &config);
        assert_eq!(
            transport.url(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let config = AppConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            api_key: Some(String::new()),
            ..AppConfig::default()
        };
        let transport = GeminiTransport::new(Client::new(), &config);
        let request = crate::generator::prompt::build_request("Frogs", None);

        let result = transport.send(&request).await;
        assert!(matches!(result, Err(GenerateError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_posts_request_and_passes_error_status_through() {
        let error_body =
            json!({ "error": { "code": 429, "status": "RESOURCE_EXHAUSTED" } }).to_string();
        let (endpoint, server) = serve_once("429 Too Many Requests", error_body.clone()).await;
        let transport = local_transport(endpoint);

        let raw = transport.send(&build_request("Frogs", Some("Noir"))).await.unwrap();
        assert_eq!(raw.status, 429);
        assert!(!raw.is_success());
        assert_eq!(raw.body, error_body);

        let request = server.await.unwrap();
        let first_line = request.lines().next().unwrap();
        assert_eq!(
            first_line,
            "POST /v1beta/models/gemini-2.0-flash:generateContent?key=k3y HTTP/1.1"
        );
        assert!(request.to_lowercase().contains("content-type: application/json"));

        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        let body: Value = serde_json::from_str(body).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Frogs"));
        assert!(prompt.contains("Noir"));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[tokio::test]
    async fn test_generator_reports_remote_status_over_http() {
        let (endpoint, server) = serve_once("503 Service Unavailable", "{}".to_string()).await;
        let generator = IdeaGenerator::with_seed(Arc::new(local_transport(endpoint)), 3);

        let result = generator.generate("Frogs", None).await;
        assert!(matches!(result, Err(GenerateError::RemoteService { status: 503 })));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_generator_parses_success_over_http() {
        let (endpoint, server) = serve_once("200 OK", envelope_with_three_ideas()).await;
        let generator = IdeaGenerator::with_seed(Arc::new(local_transport(endpoint)), 3);

        let ideas = generator.generate("Frogs", None).await.unwrap();
        assert_eq!(ideas.len(), 3);
        assert_eq!(ideas[0].coin_name, "FrogCoin");
        assert!(ideas.iter().all(|i| (50..=100).contains(&i.hype_score)));
        server.await.unwrap();
    }
}
