//! Chat session state machine.

use futures::StreamExt;
use log::{debug, warn};

use super::{
    ChatMessage, ChatRequest, ChatRole, ResponseSource, CONTEXT_WINDOW, FAILURE_NOTICE, GREETING,
    SYSTEM_INSTRUCTION,
};

/// Whether a session is waiting on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingResponse,
}

/// Ordered, append-only transcript plus the send/answer state machine.
///
/// Transitions:
///
/// - `send` (Idle → AwaitingResponse): appends the user turn and an empty
///   assistant placeholder. Rejected when busy or when the text is blank.
/// - `push_chunk` (AwaitingResponse): appends text to the placeholder.
/// - `complete` / `fail` (AwaitingResponse → Idle).
///
/// Calls that arrive in the wrong state are ignored and return `false`, so a
/// late chunk from an abandoned request cannot corrupt the transcript.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    state: ChatState,
    has_greeting: bool,
    /// Indices of failure notices; like the greeting, never sent upstream
    notices: Vec<usize>,
    system_instruction: String,
    context_window: usize,
}

impl ChatSession {
    /// Opens a session with the standard greeting.
    pub fn new() -> Self {
        Self::without_greeting().with_greeting(GREETING)
    }

    /// Opens an empty session.
    pub fn without_greeting() -> Self {
        Self {
            messages: Vec::new(),
            state: ChatState::Idle,
            has_greeting: false,
            notices: Vec::new(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            context_window: CONTEXT_WINDOW,
        }
    }

    /// Replaces any greeting with `text`.
    pub fn with_greeting(mut self, text: impl Into<String>) -> Self {
        if self.has_greeting {
            self.messages[0] = ChatMessage::assistant(text);
        } else {
            self.messages.insert(0, ChatMessage::assistant(text));
            self.notices.iter_mut().for_each(|index| *index += 1);
            self.has_greeting = true;
        }
        self
    }

    /// Overrides the persona sent upstream.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Overrides how many recent turns are sent upstream.
    pub fn with_context_window(mut self, turns: usize) -> Self {
        self.context_window = turns.max(1);
        self
    }

    /// Full transcript, greeting included.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Current state.
    pub fn state(&self) -> ChatState {
        self.state
    }

    /// True while an answer is pending.
    pub fn is_busy(&self) -> bool {
        self.state == ChatState::AwaitingResponse
    }

    /// Most recent message.
    pub fn trailing(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Starts a turn.
    ///
    /// Returns the request to hand to a response source, or `None` if the
    /// send was rejected (blank text or an answer already pending).
    pub fn send(&mut self, text: &str) -> Option<ChatRequest> {
        if self.is_busy() {
            debug!("Ignoring send while awaiting a response");
            return None;
        }
        if text.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        let request = self.request();
        self.messages.push(ChatMessage::assistant(String::new()));
        self.state = ChatState::AwaitingResponse;
        Some(request)
    }

    /// Appends an increment to the trailing assistant message.
    pub fn push_chunk(&mut self, chunk: &str) -> bool {
        if !self.is_busy() {
            return false;
        }
        match self.messages.last_mut() {
            Some(last) if last.role == ChatRole::Assistant => {
                last.content.push_str(chunk);
                true
            }
            _ => false,
        }
    }

    /// Finishes the pending answer.
    ///
    /// An answer that produced no text at all is recorded as a failure.
    pub fn complete(&mut self) -> bool {
        if !self.is_busy() {
            return false;
        }
        if self.placeholder_is_empty() {
            return self.fail();
        }
        self.state = ChatState::Idle;
        true
    }

    /// Abandons the pending answer and records the failure notice.
    ///
    /// The notice fills the placeholder if nothing arrived yet; otherwise the
    /// partial text is kept and the notice follows it as a new message.
    pub fn fail(&mut self) -> bool {
        if !self.is_busy() {
            return false;
        }
        if self.placeholder_is_empty() {
            if let Some(last) = self.messages.last_mut() {
                last.content = FAILURE_NOTICE.to_string();
            }
        } else {
            self.messages.push(ChatMessage::assistant(FAILURE_NOTICE));
        }
        self.notices.push(self.messages.len() - 1);
        self.state = ChatState::Idle;
        true
    }

    /// Runs a full turn against `source`.
    ///
    /// Returns `false` if the send was rejected.
    pub async fn ask<S>(&mut self, text: &str, source: &S) -> bool
    where
        S: ResponseSource + ?Sized,
    {
        self.ask_with(text, source, |_| {}).await
    }

    /// Like [`ChatSession::ask`], calling `on_chunk` for every increment as
    /// it is appended.
    pub async fn ask_with<S, F>(&mut self, text: &str, source: &S, mut on_chunk: F) -> bool
    where
        S: ResponseSource + ?Sized,
        F: FnMut(&str),
    {
        let Some(request) = self.send(text) else {
            return false;
        };

        let mut replies = source.respond(request);
        while let Some(reply) = replies.next().await {
            match reply {
                Ok(chunk) => {
                    if self.push_chunk(&chunk) {
                        on_chunk(&chunk);
                    }
                }
                Err(e) => {
                    warn!("{} failed to answer: {e}", source.label());
                    self.fail();
                    return true;
                }
            }
        }

        self.complete();
        true
    }

    /// Turns sent upstream: no greeting, no failure notices, no
    /// placeholder, at most the last `context_window` turns, starting with a
    /// user turn. Adjacent turns from the same role are joined so roles
    /// alternate.
    fn request(&self) -> ChatRequest {
        let skip = usize::from(self.has_greeting);
        let history: Vec<&ChatMessage> = self
            .messages
            .iter()
            .enumerate()
            .skip(skip)
            .filter(|(index, _)| !self.notices.contains(index))
            .map(|(_, message)| message)
            .collect();
        let start = history.len().saturating_sub(self.context_window);

        let mut turns: Vec<ChatMessage> = Vec::new();
        for message in history[start..]
            .iter()
            .skip_while(|message| message.role != ChatRole::User)
        {
            match turns.last_mut() {
                Some(last) if last.role == message.role => {
                    last.content.push_str("\n\n");
                    last.content.push_str(&message.content);
                }
                _ => turns.push((*message).clone()),
            }
        }

        ChatRequest {
            system_instruction: self.system_instruction.clone(),
            turns,
        }
    }

    fn placeholder_is_empty(&self) -> bool {
        self.messages
            .last()
            .is_some_and(|last| last.role == ChatRole::Assistant && last.content.is_empty())
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
