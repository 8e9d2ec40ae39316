//! Help-desk chat.
//!
//! A [`ChatSession`] holds the ordered transcript and a two-state machine
//! (`Idle` / `AwaitingResponse`). Answers come from a [`ResponseSource`]:
//! either the offline keyword table ([`LocalResponder`]) or the hosted model
//! ([`GeminiClient`]). Both deliver a stream of text increments that the
//! session appends to the trailing assistant message.
//!
//! The chat never touches workflow state, and its failures never escape as
//! errors: a failed answer becomes a fixed notice in the transcript.

pub mod gemini;
pub mod local;
pub mod session;
pub mod source;
pub mod sse;

pub use gemini::GeminiClient;
pub use local::{offline_answer, LocalResponder, OfflineGuide, OFFLINE_GUIDES, QUICK_PROMPTS};
pub use session::{ChatSession, ChatState};
pub use source::{source_for, ReplyStream, ResponseSource};

use serde::{Deserialize, Serialize};

/// Number of most recent turns sent upstream.
pub const CONTEXT_WINDOW: usize = 10;

/// Greeting shown when a session opens. Never sent upstream.
pub const GREETING: &str = "Assistente carregado. Clique em um atalho ou escreva em linguagem simples.";

/// Notice recorded when an answer cannot be produced.
pub const FAILURE_NOTICE: &str =
    "Não foi possível obter resposta do assistente agora. Verifique a conexão e a chave de API e tente novamente.";

/// Persona given to the hosted model.
pub const SYSTEM_INSTRUCTION: &str = "Você é um engenheiro de restauração de vídeo. \
Responda em português, de forma curta e prática, com comandos FFmpeg e ajustes de ComfyUI \
quando fizer sentido. O hardware de referência é uma RTX 3060 de 12 GB.";

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// What a response source is asked to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Persona and rules for the model
    pub system_instruction: String,
    /// Prior turns, oldest first; the first is always user-authored
    pub turns: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Text of the most recent user turn.
    pub fn last_user_text(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == ChatRole::User)
            .map(|turn| turn.content.as_str())
    }
}
