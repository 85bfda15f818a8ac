//! Integration tests for the chat controller.
//!
//! Unit tests for the pure pieces (reply extraction, id allocation, tag
//! stripping) live in each file's `#[cfg(test)]` block. These tests drive
//! the full submission cycle through fake transports: scripted success
//! bodies, scripted failures, and call recorders. No network involved.

use std::cell::RefCell;

use anyhow::{Result, anyhow};
use serde_json::{Value, json};

use rideboard::chat::webhook::extract_reply;
use rideboard::chat::{
    AssistantReply, AssistantTransport, ChatSession, ERROR_REPLY, GREETING, OutboundPrompt,
    TrustedHtml,
};

// ---------------------------------------------------------------------------
// Fake transports
// ---------------------------------------------------------------------------

/// Succeeds with a scripted JSON body, run through the same reply-extraction
/// path the real webhook client uses. Records every prompt it sees.
struct ScriptedTransport {
    body: Value,
    calls: RefCell<Vec<OutboundPrompt>>,
}

impl ScriptedTransport {
    fn new(body: Value) -> Self {
        Self {
            body,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl AssistantTransport for ScriptedTransport {
    fn send(&self, prompt: &OutboundPrompt) -> Result<AssistantReply> {
        self.calls.borrow_mut().push(prompt.clone());
        Ok(AssistantReply {
            html: TrustedHtml::assume_trusted(extract_reply(&self.body)),
        })
    }
}

/// Fails every request, the way a refused connection or a 500 would.
struct FailingTransport {
    calls: RefCell<usize>,
}

impl FailingTransport {
    fn new() -> Self {
        Self {
            calls: RefCell::new(0),
        }
    }
}

impl AssistantTransport for FailingTransport {
    fn send(&self, _prompt: &OutboundPrompt) -> Result<AssistantReply> {
        *self.calls.borrow_mut() += 1;
        Err(anyhow!("connection refused"))
    }
}

/// Panics if called — for asserting that rejected submissions never reach
/// the network.
struct UnreachableTransport;

impl AssistantTransport for UnreachableTransport {
    fn send(&self, prompt: &OutboundPrompt) -> Result<AssistantReply> {
        panic!("transport must not be called, got: {:?}", prompt.message);
    }
}

// ---------------------------------------------------------------------------
// Submission cycle
// ---------------------------------------------------------------------------

#[test]
fn submit_appends_user_message_then_calls_transport_once() {
    let mut session = ChatSession::new();
    let transport = ScriptedTransport::new(json!({ "output": "reply" }));

    assert!(session.submit("How many rides today?", &transport));

    assert_eq!(transport.call_count(), 1);
    let calls = transport.calls.borrow();
    assert_eq!(calls[0].message, "How many rides today?");

    // greeting, user prompt, reply — in that order
    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert!(messages[1].is_user());
    assert_eq!(messages[1].text(), "How many rides today?");
}

#[test]
fn begin_appends_the_user_message_before_any_request_is_issued() {
    let mut session = ChatSession::new();

    let prompt = session.begin("hello").expect("submission accepted");

    // The prompt is already in the transcript even though nothing has been
    // sent yet.
    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].is_user());
    assert_eq!(messages[1].text(), "hello");
    assert_eq!(prompt.message, "hello");
    assert!(session.is_in_flight());
}

#[test]
fn draft_is_forwarded_as_typed() {
    let mut session = ChatSession::new();
    let prompt = session.begin("  padded question  ").expect("accepted");
    assert_eq!(prompt.message, "  padded question  ");
    assert_eq!(session.messages()[1].text(), "  padded question  ");
}

// ---------------------------------------------------------------------------
// Rejected submissions
// ---------------------------------------------------------------------------

#[test]
fn empty_and_whitespace_drafts_are_noops() {
    let mut session = ChatSession::new();

    assert!(!session.submit("", &UnreachableTransport));
    assert!(!session.submit("   ", &UnreachableTransport));
    assert!(!session.submit("\n\t", &UnreachableTransport));

    assert_eq!(session.messages().len(), 1);
    assert!(!session.is_in_flight());
}

#[test]
fn submitting_while_in_flight_is_a_noop() {
    let mut session = ChatSession::new();

    let prompt = session.begin("first").expect("accepted");
    assert!(session.is_in_flight());

    // A second submission while the first is outstanding is dropped, not
    // queued: no transcript growth, no transport call.
    assert!(session.begin("second").is_none());
    assert!(!session.submit("third", &UnreachableTransport));
    assert_eq!(session.messages().len(), 2);

    // The first cycle still completes normally.
    assert_eq!(prompt.message, "first");
    session.resolve(Ok(AssistantReply {
        html: TrustedHtml::assume_trusted("done"),
    }));
    assert!(!session.is_in_flight());
    assert_eq!(session.messages().len(), 3);
}

// ---------------------------------------------------------------------------
// Reply handling
// ---------------------------------------------------------------------------

#[test]
fn success_with_output_field_appends_one_html_reply() {
    let mut session = ChatSession::new();
    let transport = ScriptedTransport::new(json!({ "output": "X" }));

    session.submit("q", &transport);

    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    let reply = &messages[2];
    assert!(!reply.is_user());
    assert!(reply.is_html());
    assert_eq!(reply.text(), "X");
}

#[test]
fn success_without_output_falls_back_to_text_field() {
    let mut session = ChatSession::new();
    let transport = ScriptedTransport::new(json!({ "text": "Y" }));

    session.submit("q", &transport);

    assert_eq!(session.messages()[2].text(), "Y");
}

#[test]
fn success_with_neither_field_falls_back_to_serialized_body() {
    let mut session = ChatSession::new();
    let transport = ScriptedTransport::new(json!({ "rows": 3 }));

    session.submit("q", &transport);

    assert_eq!(session.messages()[2].text(), r#"{"rows":3}"#);
}

#[test]
fn failure_appends_the_fixed_apology() {
    let mut session = ChatSession::new();
    let transport = FailingTransport::new();

    session.submit("q", &transport);

    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    let reply = &messages[2];
    assert!(!reply.is_user());
    assert!(!reply.is_html());
    assert_eq!(reply.text(), ERROR_REPLY);
    // The underlying error detail never leaks into the transcript.
    assert!(!reply.text().contains("connection refused"));
    assert!(!session.is_in_flight());
}

#[test]
fn failure_then_success_keeps_the_session_usable() {
    let mut session = ChatSession::new();

    session.submit("first", &FailingTransport::new());
    assert!(!session.is_in_flight());

    let transport = ScriptedTransport::new(json!({ "output": "recovered" }));
    session.submit("second", &transport);

    let messages = session.messages();
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[2].text(), ERROR_REPLY);
    assert_eq!(messages[4].text(), "recovered");
}

// ---------------------------------------------------------------------------
// In-flight window
// ---------------------------------------------------------------------------

#[test]
fn in_flight_is_true_strictly_between_begin_and_resolve() {
    let mut session = ChatSession::new();
    assert!(!session.is_in_flight());

    session.begin("q").expect("accepted");
    assert!(session.is_in_flight());

    session.resolve(Err(anyhow!("boom")));
    assert!(!session.is_in_flight());

    // And again for the success path.
    session.begin("q2").expect("accepted");
    assert!(session.is_in_flight());
    session.resolve(Ok(AssistantReply {
        html: TrustedHtml::assume_trusted("ok"),
    }));
    assert!(!session.is_in_flight());
}

// ---------------------------------------------------------------------------
// Transcript ordering scenario
// ---------------------------------------------------------------------------

#[test]
fn transcript_reads_greeting_prompt_reply_in_order() {
    let mut session = ChatSession::new();
    let transport = ScriptedTransport::new(json!({ "output": "<p>12,847 rides</p>" }));

    session.submit("How many rides today?", &transport);

    let messages = session.messages();
    assert_eq!(messages.len(), 3);

    assert!(!messages[0].is_user());
    assert_eq!(messages[0].text(), GREETING);

    assert!(messages[1].is_user());
    assert_eq!(messages[1].text(), "How many rides today?");

    assert!(!messages[2].is_user());
    assert_eq!(messages[2].text(), "<p>12,847 rides</p>");

    // Creation order is also id order.
    assert!(messages[0].id < messages[1].id);
    assert!(messages[1].id < messages[2].id);
}
