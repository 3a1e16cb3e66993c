//! Transform service client.
//!
//! Requests run against the OpenAI chat completions API on a dedicated
//! worker thread; the UI thread submits commands and drains events once per
//! frame without ever blocking on the network.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const OPENAI_MODELS_URL: &str = "https://api.openai.com/v1/models";
/// Model used when a transformation does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano-2025-04-14";

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("malformed response: {0}")]
    Response(String),
    #[error("transform worker is gone")]
    Disconnected,
}

/// A single transformation to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformRequest {
    pub text: String,
    pub system_prompt: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// Events surfaced to the UI thread.
#[derive(Debug, Clone)]
pub enum TransformEvent {
    Started { label: String },
    Completed { label: String, output: String },
    Failed { label: String, message: String },
    ModelsListed(Vec<String>),
}

enum WorkerCommand {
    Transform { label: String, request: TransformRequest },
    ListModels,
}

/// Client handle owning the worker thread. Dropping it shuts the worker
/// down by closing the command channel.
pub struct TransformClient {
    command_tx: Option<Sender<WorkerCommand>>,
    event_rx: Receiver<TransformEvent>,
    _thread: Option<JoinHandle<()>>,
}

impl TransformClient {
    /// Spawn the worker with the given API key.
    pub fn new(api_key: String) -> Self {
        let (command_tx, command_rx) = channel();
        let (event_tx, event_rx) = channel();
        let handle = thread::Builder::new()
            .name("transform-worker".into())
            .spawn(move || worker_loop(api_key, command_rx, event_tx))
            .ok();
        Self {
            command_tx: Some(command_tx),
            event_rx,
            _thread: handle,
        }
    }

    /// Queue a transformation. `label` comes back with every event so the UI
    /// can tell concurrent requests apart.
    pub fn transform(
        &self,
        label: impl Into<String>,
        request: TransformRequest,
    ) -> Result<(), TransformError> {
        self.send(WorkerCommand::Transform {
            label: label.into(),
            request,
        })
    }

    /// Queue a model listing request.
    pub fn list_models(&self) -> Result<(), TransformError> {
        self.send(WorkerCommand::ListModels)
    }

    fn send(&self, command: WorkerCommand) -> Result<(), TransformError> {
        self.command_tx
            .as_ref()
            .ok_or(TransformError::Disconnected)?
            .send(command)
            .map_err(|_| TransformError::Disconnected)
    }

    /// Drain pending events without blocking. Called once per frame.
    pub fn poll_events(&mut self) -> Vec<TransformEvent> {
        let mut events = Vec::new();
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

impl Drop for TransformClient {
    fn drop(&mut self) {
        // Closing the command channel ends the worker's recv loop.
        self.command_tx.take();
    }
}

fn worker_loop(
    api_key: String,
    command_rx: Receiver<WorkerCommand>,
    event_tx: Sender<TransformEvent>,
) {
    let client = reqwest::blocking::Client::new();
    while let Ok(command) = command_rx.recv() {
        match command {
            WorkerCommand::Transform { label, request } => {
                let _ = event_tx.send(TransformEvent::Started {
                    label: label.clone(),
                });
                match run_transform(&client, &api_key, &request) {
                    Ok(output) => {
                        let _ = event_tx.send(TransformEvent::Completed { label, output });
                    }
                    Err(err) => {
                        log::error!("transform {label:?} failed: {err}");
                        let _ = event_tx.send(TransformEvent::Failed {
                            label,
                            message: err.to_string(),
                        });
                    }
                }
            }
            WorkerCommand::ListModels => match run_list_models(&client, &api_key) {
                Ok(models) => {
                    let _ = event_tx.send(TransformEvent::ModelsListed(models));
                }
                Err(err) => {
                    log::error!("model listing failed: {err}");
                    let _ = event_tx.send(TransformEvent::Failed {
                        label: "models".into(),
                        message: err.to_string(),
                    });
                }
            },
        }
    }
    log::debug!("transform worker exiting");
}

fn run_transform(
    client: &reqwest::blocking::Client,
    api_key: &str,
    request: &TransformRequest,
) -> Result<String, TransformError> {
    let body = ChatRequest {
        model: &request.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &request.system_prompt,
            },
            ChatMessage {
                role: "user",
                content: &request.text,
            },
        ],
    };
    let response = client
        .post(OPENAI_CHAT_URL)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|err| TransformError::Http(err.to_string()))?;
    let parsed: ChatResponse = response
        .json()
        .map_err(|err| TransformError::Response(err.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| TransformError::Response("no choices in completion".into()))
}

fn run_list_models(
    client: &reqwest::blocking::Client,
    api_key: &str,
) -> Result<Vec<String>, TransformError> {
    let response = client
        .get(OPENAI_MODELS_URL)
        .bearer_auth(api_key)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|err| TransformError::Http(err.to_string()))?;
    let parsed: ModelList = response
        .json()
        .map_err(|err| TransformError::Response(err.to_string()))?;
    Ok(parsed.data.into_iter().map(|entry| entry.id).collect())
}

/// Split a transformation response into one formatted text per variant.
///
/// The service sometimes answers with JSON carrying known sections, either a
/// single object or an array of variants. Anything else passes through as a
/// single variant, with escaped newlines unescaped.
pub fn format_variants(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items.iter().map(format_section).collect(),
        Ok(value @ Value::Object(_)) => vec![format_section(&value)],
        _ => vec![raw.replace("\\n", "\n")],
    }
}

/// All variants flattened into one text for the output editor.
pub fn format_output(raw: &str) -> String {
    format_variants(raw).join("\n\n----\n\n")
}

fn format_section(value: &Value) -> String {
    let Value::Object(map) = value else {
        return match value {
            Value::String(s) => s.replace("\\n", "\n"),
            other => other.to_string(),
        };
    };
    let mut out = String::new();
    if let Some(headline) = map.get("headline").and_then(Value::as_str) {
        out.push_str(headline);
        out.push_str("\n\n");
    }
    if let Some(body) = map.get("transformed").and_then(Value::as_str) {
        out.push_str(body);
        out.push_str("\n\n");
    }
    for key in ["seo", "essay", "social", "linkedin"] {
        if let Some(section) = map.get(key).and_then(Value::as_str) {
            out.push_str(&key.to_uppercase());
            out.push_str(":\n");
            out.push_str(section);
            out.push_str("\n\n");
        }
    }
    if out.is_empty() {
        value.to_string()
    } else {
        out.trim_end().replace("\\n", "\n")
    }
}

/// Cycles through the variants of a transformation that returned several
/// outputs.
#[derive(Debug, Clone, Default)]
pub struct TransformationList {
    texts: Vec<String>,
    index: usize,
}

impl TransformationList {
    pub fn set_texts(&mut self, texts: Vec<String>) {
        self.texts = texts;
        self.index = 0;
    }

    pub fn current(&self) -> &str {
        self.texts.get(self.index).map(String::as_str).unwrap_or("")
    }

    pub fn next(&mut self) -> &str {
        if !self.texts.is_empty() {
            self.index = (self.index + 1) % self.texts.len();
        }
        self.current()
    }

    pub fn prev(&mut self) -> &str {
        if !self.texts.is_empty() {
            self.index = (self.index + self.texts.len() - 1) % self.texts.len();
        }
        self.current()
    }

    /// One-based position for the `2/5` style indicator.
    pub fn position(&self) -> usize {
        if self.texts.is_empty() {
            0
        } else {
            self.index + 1
        }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
