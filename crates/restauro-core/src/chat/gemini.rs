//! Client for the hosted Gemini text-generation API.

use std::collections::VecDeque;
use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, ChatRequest, ChatRole, ReplyStream, ResponseSource};
use crate::chat::sse::SseDecoder;
use crate::error::{RestauroError, Result};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: WireContent,
    contents: Vec<WireContent>,
}

#[derive(Debug, Serialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize)]
struct WirePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

impl GenerateRequest {
    fn from_chat(request: &ChatRequest) -> Self {
        Self {
            system_instruction: WireContent {
                role: None,
                parts: vec![WirePart {
                    text: request.system_instruction.clone(),
                }],
            },
            contents: request.turns.iter().map(WireContent::from_message).collect(),
        }
    }
}

impl WireContent {
    fn from_message(message: &ChatMessage) -> Self {
        let role = match message.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "model",
        };
        Self {
            role: Some(role),
            parts: vec![WirePart {
                text: message.content.clone(),
            }],
        }
    }
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String> {
        if let Some(error) = self.error {
            return Err(RestauroError::Remote {
                message: error.message,
            });
        }
        Ok(self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default())
    }
}

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    label: String,
    streaming: bool,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            label: format!("gemini:{model}"),
            streaming: true,
        }
    }

    /// Chooses between incremental answers and one complete answer per turn.
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Points the client at another endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Asks for a complete answer in one response.
    pub async fn query(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self.post(&url, request).await?;
        parse_answer(&response.text().await?)
    }

    /// Asks for an answer delivered as server-sent events.
    pub async fn stream(&self, request: &ChatRequest) -> Result<ReplyStream> {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        );
        let response = self.post(&url, request).await?;
        Ok(text_stream(response.bytes_stream()))
    }

    async fn post(&self, url: &str, request: &ChatRequest) -> Result<reqwest::Response> {
        debug!(
            "Requesting {} with {} turns of context",
            self.model,
            request.turns.len()
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::from_chat(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);
            return Err(RestauroError::Remote {
                message: format!("HTTP {status}: {message}"),
            });
        }

        Ok(response)
    }
}

impl ResponseSource for GeminiClient {
    fn label(&self) -> &str {
        &self.label
    }

    fn respond(&self, request: ChatRequest) -> ReplyStream {
        let client = self.clone();
        if self.streaming {
            stream::once(async move { client.stream(&request).await })
                .try_flatten()
                .boxed()
        } else {
            stream::once(async move { client.query(&request).await }).boxed()
        }
    }
}

/// Decodes one SSE payload into the text it carries.
fn parse_event(payload: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(payload)?;
    response.into_text()
}

/// Decodes a complete `generateContent` body. An answer without text is an
/// error.
fn parse_answer(body: &str) -> Result<String> {
    let text = parse_event(body)?;
    if text.is_empty() {
        return Err(RestauroError::Remote {
            message: "empty answer".to_string(),
        });
    }
    Ok(text)
}

struct DecodeState<S> {
    body: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<Result<String>>,
    finished: bool,
}

impl<S> DecodeState<S> {
    fn queue(&mut self, payload: &str) {
        match parse_event(payload) {
            Ok(text) if text.is_empty() => {}
            other => self.pending.push_back(other),
        }
    }
}

/// Turns a raw SSE body into text increments.
///
/// Transport and decode errors are forwarded as the final item.
pub(crate) fn text_stream<S, B, E>(body: S) -> ReplyStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send,
    E: Into<RestauroError> + Send,
{
    let state = DecodeState {
        body: Box::pin(body),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                if item.is_err() {
                    state.finished = true;
                    state.pending.clear();
                }
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.body.next().await {
                Some(Ok(bytes)) => {
                    for payload in state.decoder.feed(bytes.as_ref()) {
                        state.queue(&payload);
                    }
                }
                Some(Err(e)) => {
                    state.pending.push_back(Err(e.into()));
                }
                None => {
                    state.finished = true;
                    if let Some(payload) = state.decoder.finish() {
                        state.queue(&payload);
                    }
                }
            }
        }
    })
    .boxed()
}
