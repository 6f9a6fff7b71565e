//! Shared fakes for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use coinspark::generator::GenerateContentRequest;
use coinspark::ui::Clipboard;
use coinspark::{ClipboardError, CompletionTransport, GenerateError, RawResponse};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Scripted transport: replays queued responses and counts calls.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<RawResponse, GenerateError>>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call waits for `gate` to be notified before answering.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push(&self, response: Result<RawResponse, GenerateError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn push_ok(&self, payload: &str) {
        self.push(Ok(RawResponse {
            status: 200,
            body: envelope(payload),
        }));
    }

    pub fn push_status(&self, status: u16) {
        self.push(Ok(RawResponse {
            status,
            body: json!({ "error": { "code": status, "message": "nope" } }).to_string(),
        }));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|r| r.contents[0].parts[0].text.clone())
    }
}

#[async_trait]
impl CompletionTransport for FakeTransport {
    async fn send(&self, request: &GenerateContentRequest) -> Result<RawResponse, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerateError::Transport("no scripted response".to_string())))
    }
}

/// Clipboard that records what was written, or always fails.
#[derive(Clone, Default)]
pub struct FakeClipboard {
    pub written: Arc<Mutex<Vec<String>>>,
    pub broken: bool,
}

impl Clipboard for FakeClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn idea_json(name: &str, concept: &str) -> serde_json::Value {
    json!({
        "coinName": name,
        "ticker": "ZZZ",
        "concept": concept,
        "mascot": "A drowsy sloth in a hoodie",
        "emoji": "🦥💤",
        "slogan": "HODL and nap",
        "communityVibe": "Extremely chill"
    })
}

/// A valid three-idea payload.
pub fn three_ideas() -> String {
    json!([
        idea_json("SlothCoin", "Sleep to earn"),
        idea_json("NapToken", "Yield from naps"),
        idea_json("SnoozeCash", "Proof of rest"),
    ])
    .to_string()
}

pub fn envelope(payload: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": payload }] },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}
