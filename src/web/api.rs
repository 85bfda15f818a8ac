//! JSON API handlers for the web dashboard.
//!
//! Each handler returns a `Response<Cursor<Vec<u8>>>` with JSON content.
//! Chat handlers take the session and transport as parameters so tests can
//! drive them with fakes.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tiny_http::{Response, StatusCode};

use crate::chat::{AssistantTransport, ChatSession, Message, Sender};
use crate::data;

use super::content_type_json;

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

/// One transcript entry on the wire.
#[derive(Serialize)]
struct MessageView {
    id: u64,
    sender: &'static str,
    text: String,
    /// When true the client renders `text` as raw markup, unescaped.
    html: bool,
    /// RFC 3339 creation time.
    timestamp: String,
}

impl MessageView {
    fn from_message(message: &Message) -> Self {
        Self {
            id: message.id,
            sender: match message.sender {
                Sender::User => "user",
                Sender::Assistant => "assistant",
            },
            text: message.text().to_string(),
            html: message.is_html(),
            timestamp: message.timestamp.to_rfc3339(),
        }
    }
}

/// Chat transcript response.
#[derive(Serialize)]
struct TranscriptResponse {
    in_flight: bool,
    messages: Vec<MessageView>,
}

impl TranscriptResponse {
    fn from_session(session: &ChatSession) -> Self {
        Self {
            in_flight: session.is_in_flight(),
            messages: session
                .messages()
                .iter()
                .map(MessageView::from_message)
                .collect(),
        }
    }
}

/// Chat submission request body.
#[derive(Deserialize)]
struct ChatSendRequest {
    message: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

/// Build a JSON error response with the given status.
fn json_error(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status))
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/dashboard` — the full sample dataset.
pub fn get_dashboard() -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&data::sample())
}

/// `GET /api/chat` — the current transcript and in-flight flag.
pub fn get_chat(session: &ChatSession) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&TranscriptResponse::from_session(session))
}

/// `POST /api/chat` — run one submission cycle and return the updated
/// transcript.
///
/// Blank submissions (and submissions while a request is in flight, which
/// the controller guards against for non-HTTP callers) are dropped without
/// touching the transcript; the response is still the current transcript so
/// the client can re-render unconditionally.
pub fn post_chat(
    session: &mut ChatSession,
    transport: &dyn AssistantTransport,
    body: &str,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let request: ChatSendRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(_) => return Ok(json_error(400, "expected a JSON body with a \"message\" field")),
    };

    session.submit(&request.message, transport);
    json_response(&TranscriptResponse::from_session(session))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
