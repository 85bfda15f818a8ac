//! Chat assistant controller.
//!
//! Holds the conversation transcript and mediates one outbound request per
//! user submission. The cycle is an explicit state machine:
//!
//! ```text
//! Idle --begin--> Sending --resolve--> Idle
//! ```
//!
//! - [`ChatSession::begin`] rejects blank drafts and submissions made while
//!   a request is outstanding, appends the user message, and raises the
//!   in-flight flag.
//! - [`ChatSession::resolve`] appends the assistant reply (or the fixed
//!   apology on failure) and clears the flag.
//! - [`ChatSession::submit`] wires the two around a blocking transport call
//!   for callers that want the whole cycle at once.
//!
//! The transcript is append-only: messages are never mutated or removed for
//! the lifetime of the session, and ids are strictly increasing.

pub mod webhook;

use anyhow::Result;
use chrono::{DateTime, Utc};

/// Greeting seeded as the first assistant message of every session.
pub const GREETING: &str = "Hi! I'm your ride analytics assistant. \
    Ask me anything about your data, metrics, or need help with insights!";

/// Fixed assistant reply appended when a submission fails. Deliberately
/// generic — the underlying error detail is never shown to the user.
pub const ERROR_REPLY: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

// ---------------------------------------------------------------------------
// Message model
// ---------------------------------------------------------------------------

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// A fragment of HTML the producer vouches for.
///
/// Wrapping a string in `TrustedHtml` is an explicit assertion that its
/// source is trusted: nothing downstream escapes or sanitizes it, and the
/// dashboard injects it into the page as raw markup. Construct one only for
/// content from an endpoint you control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Assert that `html` comes from a trusted producer and may be rendered
    /// without escaping.
    pub fn assume_trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// The raw markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort plain-text rendering for terminals: drops `<...>` tags
    /// and decodes the handful of entities that show up in short replies.
    pub fn strip_tags(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut in_tag = false;
        for ch in self.0.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(ch),
                _ => {}
            }
        }
        out.replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&nbsp;", " ")
            .trim()
            .to_string()
    }
}

/// Message payload: plain text, or markup the producer has vouched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Plain(String),
    Html(TrustedHtml),
}

/// One immutable entry in the transcript.
#[derive(Debug, Clone)]
pub struct Message {
    /// Creation-time milliseconds, bumped on collision so ids are strictly
    /// increasing within a session.
    pub id: u64,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub body: MessageBody,
}

impl Message {
    /// The message text regardless of body kind (raw markup for HTML).
    pub fn text(&self) -> &str {
        match &self.body {
            MessageBody::Plain(text) => text,
            MessageBody::Html(html) => html.as_str(),
        }
    }

    pub fn is_html(&self) -> bool {
        matches!(self.body, MessageBody::Html(_))
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

// ---------------------------------------------------------------------------
// Transport seam
// ---------------------------------------------------------------------------

/// The payload sent to the assistant endpoint for one submission.
#[derive(Debug, Clone)]
pub struct OutboundPrompt {
    /// The user's text, passed through as typed.
    pub message: String,
    /// Submission time; serialized as RFC 3339 on the wire.
    pub timestamp: DateTime<Utc>,
}

/// A successful assistant response, already reduced to display markup.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub html: TrustedHtml,
}

/// One blocking request/response exchange with the assistant endpoint.
///
/// [`webhook::WebhookClient`] is the production implementation; tests inject
/// scripted fakes. Any `Err` collapses into the single user-visible failure
/// kind ([`ERROR_REPLY`]) — implementations should not expect callers to
/// inspect the error beyond logging.
pub trait AssistantTransport {
    fn send(&self, prompt: &OutboundPrompt) -> Result<AssistantReply>;
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The conversation state: an append-only transcript plus the in-flight
/// guard that keeps submissions serialized.
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<Message>,
    in_flight: bool,
}

impl ChatSession {
    /// A fresh session seeded with the assistant greeting.
    pub fn new() -> Self {
        let mut session = Self {
            messages: Vec::new(),
            in_flight: false,
        };
        session.append(Sender::Assistant, MessageBody::Plain(GREETING.to_string()));
        session
    }

    /// The full transcript, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a submission is currently awaiting its reply.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start a submission cycle.
    ///
    /// Returns `None` — with no state change at all — when `draft` is empty
    /// or whitespace-only, or when a request is already in flight (rejected
    /// submissions are dropped, not queued). Otherwise appends the user
    /// message, raises the in-flight flag, and returns the payload to send.
    ///
    /// The user message lands in the transcript before the caller gets a
    /// chance to issue the request, so the prompt always precedes its
    /// eventual reply.
    pub fn begin(&mut self, draft: &str) -> Option<OutboundPrompt> {
        if draft.trim().is_empty() || self.in_flight {
            return None;
        }

        // The draft is forwarded as typed, untrimmed.
        let prompt = OutboundPrompt {
            message: draft.to_string(),
            timestamp: Utc::now(),
        };
        self.append(Sender::User, MessageBody::Plain(prompt.message.clone()));
        self.in_flight = true;
        Some(prompt)
    }

    /// Finish a submission cycle.
    ///
    /// On success appends the assistant reply as trusted markup; on failure
    /// appends [`ERROR_REPLY`] as plain text. Clears the in-flight flag
    /// unconditionally. Callers pair each [`begin`](Self::begin) with
    /// exactly one `resolve`.
    pub fn resolve(&mut self, outcome: Result<AssistantReply>) {
        match outcome {
            Ok(reply) => self.append(Sender::Assistant, MessageBody::Html(reply.html)),
            Err(_) => self.append(
                Sender::Assistant,
                MessageBody::Plain(ERROR_REPLY.to_string()),
            ),
        }
        self.in_flight = false;
    }

    /// Run one full submission cycle against `transport`.
    ///
    /// Returns `true` when a cycle ran (the transcript grew by a user
    /// message and an assistant message), `false` when the submission was
    /// rejected and the transport was never called.
    pub fn submit(&mut self, draft: &str, transport: &dyn AssistantTransport) -> bool {
        let Some(prompt) = self.begin(draft) else {
            return false;
        };
        let outcome = transport.send(&prompt);
        self.resolve(outcome);
        true
    }

    fn append(&mut self, sender: Sender, body: MessageBody) {
        let now = Utc::now();
        let id = next_message_id(self.messages.last().map(|m| m.id), now);
        self.messages.push(Message {
            id,
            sender,
            timestamp: now,
            body,
        });
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocate the next message id from the creation clock, bumping past the
/// previous id when two messages land within the same millisecond.
fn next_message_id(last: Option<u64>, now: DateTime<Utc>) -> u64 {
    let stamp = now.timestamp_millis().max(0) as u64;
    match last {
        Some(prev) if stamp <= prev => prev + 1,
        _ => stamp,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_follow_the_clock() {
        let t = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(next_message_id(None, t), 1_700_000_000_000);
        assert_eq!(next_message_id(Some(999), t), 1_700_000_000_000);
    }

    #[test]
    fn ids_bump_on_same_millisecond() {
        let t = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(next_message_id(Some(1_700_000_000_000), t), 1_700_000_000_001);
        assert_eq!(next_message_id(Some(1_700_000_000_005), t), 1_700_000_000_006);
    }

    #[test]
    fn session_ids_strictly_increase() {
        let mut session = ChatSession::new();
        for i in 0..20 {
            session.append(Sender::User, MessageBody::Plain(format!("m{i}")));
        }
        let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "ids must strictly increase: {ids:?}");
        }
    }

    #[test]
    fn new_session_starts_with_greeting_and_idle() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        let greeting = &session.messages()[0];
        assert!(!greeting.is_user());
        assert!(!greeting.is_html());
        assert_eq!(greeting.text(), GREETING);
        assert!(!session.is_in_flight());
    }

    #[test]
    fn strip_tags_drops_markup_and_decodes_entities() {
        let html = TrustedHtml::assume_trusted("<p>Rides are <b>up</b> 12% &amp; rising</p>");
        assert_eq!(html.strip_tags(), "Rides are up 12% & rising");
    }

    #[test]
    fn strip_tags_plain_text_passes_through() {
        let html = TrustedHtml::assume_trusted("no markup here");
        assert_eq!(html.strip_tags(), "no markup here");
    }
}
