//! In-process stand-in for the Bedrock runtime.
//!
//! [`FakeBedrock`] answers `InvokeModel` calls with canned envelopes chosen
//! by model family, records every request, and can be told to fail calls to
//! a given model. Embeddings are bag-of-words hashes, so texts sharing words
//! land close together under cosine similarity.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use docchat_kernel::llm::{ModelError, ModelResult, ModelRuntime};
use serde_json::{Value, json};

/// Embedding length produced by the fake Titan model.
pub const EMBEDDING_DIMS: usize = 64;

/// Canonical 1×1 transparent PNG.
pub const TINY_PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// One recorded `InvokeModel` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model_id: String,
    pub body: Value,
}

pub struct FakeBedrock {
    calls: Mutex<Vec<RecordedCall>>,
    failures: Mutex<HashMap<String, String>>,
    dims: usize,
}

impl FakeBedrock {
    pub fn new() -> Self {
        Self::with_dims(EMBEDDING_DIMS)
    }

    pub fn with_dims(dims: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            dims,
        }
    }

    /// Make every call whose model id starts with `prefix` fail.
    pub fn fail_model(&self, prefix: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(prefix.to_string(), message.to_string());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, prefix: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.model_id.starts_with(prefix))
            .collect()
    }

    /// Deterministic bag-of-words embedding.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dims];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            v[fnv1a(word.as_bytes()) as usize % self.dims] += 1.0;
        }
        v
    }

    fn respond(&self, model_id: &str, body: &Value) -> ModelResult<Value> {
        if model_id.starts_with("amazon.titan-embed") {
            let text = body["inputText"].as_str().unwrap_or_default();
            return Ok(json!({
                "embedding": self.embed_text(text),
                "inputTextTokenCount": text.split_whitespace().count(),
            }));
        }
        if model_id.starts_with("ai21.") {
            return Ok(json!({
                "id": 1,
                "completions": [{
                    "data": { "text": format!("[j2] {}", tail(body["prompt"].as_str().unwrap_or_default())) },
                    "finishReason": { "reason": "endoftext" }
                }]
            }));
        }
        if model_id.starts_with("meta.llama") {
            return Ok(json!({
                "generation": format!("[llama2] {}", tail(body["prompt"].as_str().unwrap_or_default())),
                "stop_reason": "stop"
            }));
        }
        if model_id.starts_with("stability.") {
            return Ok(json!({
                "result": "success",
                "artifacts": [{
                    "seed": body["seed"],
                    "base64": TINY_PNG_BASE64,
                    "finishReason": "SUCCESS"
                }]
            }));
        }
        Err(ModelError::Api(format!(
            "ValidationException: unknown model {model_id}"
        )))
    }
}

#[async_trait]
impl ModelRuntime for FakeBedrock {
    fn name(&self) -> &str {
        "fake-bedrock"
    }

    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> ModelResult<Vec<u8>> {
        let body: Value = serde_json::from_slice(&body)?;
        self.calls.lock().unwrap().push(RecordedCall {
            model_id: model_id.to_string(),
            body: body.clone(),
        });

        let failure = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .find(|(prefix, _)| model_id.starts_with(prefix.as_str()))
            .map(|(_, message)| message.clone());
        if let Some(message) = failure {
            return Err(ModelError::Api(message));
        }

        let response = self.respond(model_id, &body)?;
        Ok(serde_json::to_vec(&response)?)
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf29ce484222325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x100000001b3)
    })
}

// Last non-empty line of the prompt, so answers are traceable in asserts.
fn tail(prompt: &str) -> String {
    prompt
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or_default()
        .trim()
        .to_string()
}
