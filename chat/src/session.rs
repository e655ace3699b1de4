//! One chat surface: the send pipeline, typing flag, and reactions.
//!
//! DESIGN
//! ======
//! The send pipeline is split into synchronous transitions
//! ([`ChatSession::begin_send`], [`ChatSession::complete_send`],
//! [`ChatSession::fail_send`]) bracketing one backend call, with
//! [`ChatSession::send`] composing them for callers that can hold the
//! session across the await. UI hosts that cannot (signal-stored state)
//! drive the same transitions around their own await.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::api::{ApiError, ChatApi, ModelVariant, WireMessage, to_wire_history};
use crate::feedback::FeedbackMonitor;
use crate::message::{Message, MessageLog, Reaction, Role};
use crate::reply;

/// One independent conversation bound to one backend model variant.
///
/// Sessions never share message history; the only state shared between
/// the two live sessions is the coordinator's input line.
#[derive(Clone, Debug)]
pub struct ChatSession {
    variant: ModelVariant,
    pub log: MessageLog,
    is_typing: bool,
    feedback: FeedbackMonitor,
}

impl ChatSession {
    #[must_use]
    pub fn new(variant: ModelVariant) -> Self {
        Self {
            variant,
            log: MessageLog::default(),
            is_typing: false,
            feedback: FeedbackMonitor::default(),
        }
    }

    #[must_use]
    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    #[must_use]
    pub fn feedback(&self) -> &FeedbackMonitor {
        &self.feedback
    }

    /// Start a send: format the outgoing history, append the user
    /// message, and raise the typing flag. Returns the history to post,
    /// or `None` while a send is already in flight.
    pub fn begin_send(&mut self, text: &str, now_ms: f64) -> Option<Vec<WireMessage>> {
        if self.is_typing {
            return None;
        }
        let history = to_wire_history(self.log.messages(), text);
        self.log.append(Message::new(Role::User, text, now_ms));
        self.is_typing = true;
        Some(history)
    }

    /// Complete a send with a raw response body: append the assembled
    /// bot reply and clear the typing flag. Returns the new message's
    /// index.
    pub fn complete_send(&mut self, body: &str, now_ms: f64) -> usize {
        self.is_typing = false;
        self.log
            .append(Message::new(Role::Bot, reply::assemble_reply(body), now_ms))
    }

    /// Abort a send after a transport failure: clear the typing flag and
    /// append nothing.
    pub fn fail_send(&mut self) {
        self.is_typing = false;
    }

    /// Full send pipeline against `api`. A send issued while one is in
    /// flight is inert. Transport failure appends no message; the error
    /// is returned for the caller to surface. There is no retry.
    pub async fn send<A: ChatApi>(&mut self, text: &str, api: &A) -> Result<(), ApiError> {
        let Some(history) = self.begin_send(text, api.now_ms()) else {
            return Ok(());
        };
        match api.chat(self.variant, history).await {
            Ok(body) => {
                self.complete_send(&body, api.now_ms());
                Ok(())
            }
            Err(error) => {
                log::warn!("chat send failed: {error}");
                self.fail_send();
                Err(error)
            }
        }
    }

    /// Apply a reaction to the message at `index`, routing the dislike
    /// delta through the feedback monitor. When sustained negative
    /// feedback escalates, the system support message is appended and its
    /// index returned.
    pub fn react(&mut self, index: usize, reaction: Reaction, now_ms: f64) -> Option<usize> {
        let delta = self.log.set_reaction(index, reaction);
        let escalation = self.feedback.observe(delta)?;
        Some(self.log.append(Message::new(Role::System, escalation, now_ms)))
    }
}
