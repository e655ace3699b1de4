//! Ordered chat message log with reaction state.
//!
//! DESIGN
//! ======
//! Each chat surface owns one `MessageLog`. Messages are immutable after
//! append except for `reaction`, and every reaction change reports a
//! signed dislike delta so feedback tracking stays decoupled from storage
//! internals.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use serde::{Deserialize, Serialize};

/// Author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
    System,
}

impl Role {
    /// Role name expected by the inference backends. The internal `bot`
    /// role is rewritten to `assistant`; `user` and `system` pass through.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "assistant",
            Self::System => "system",
        }
    }
}

/// A thumbs up/down rating on a bot message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

/// Attachment kind for media messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Link,
}

/// An image or link attached to a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub kind: MediaKind,
    pub url: String,
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction: Option<Reaction>,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>, timestamp_ms: f64) -> Self {
        Self { role, content: content.into(), timestamp_ms, media: None, reaction: None }
    }
}

/// Ordered log of messages for one chat session.
///
/// Stored timestamps are non-decreasing in append order: a message dated
/// earlier than the current tail is clamped to the tail's timestamp.
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Append a message and return its index.
    pub fn append(&mut self, mut message: Message) -> usize {
        if let Some(last) = self.messages.last() {
            if message.timestamp_ms < last.timestamp_ms {
                message.timestamp_ms = last.timestamp_ms;
            }
        }
        self.messages.push(message);
        self.messages.len() - 1
    }

    /// Toggle the reaction on the message at `index` and return the signed
    /// change in dislike count: `+1` when the message becomes disliked,
    /// `-1` when it stops being disliked, `0` otherwise. Setting the
    /// reaction already present clears it; setting a different one
    /// replaces it.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range; callers hand indices back from
    /// [`MessageLog::append`], so an out-of-range index is a bug.
    pub fn set_reaction(&mut self, index: usize, reaction: Reaction) -> i32 {
        let message = &mut self.messages[index];
        let previous = message.reaction;
        let next = if previous == Some(reaction) { None } else { Some(reaction) };
        message.reaction = next;

        let was_dislike = previous == Some(Reaction::Dislike);
        let is_dislike = next == Some(Reaction::Dislike);
        match (was_dislike, is_dislike) {
            (false, true) => 1,
            (true, false) => -1,
            _ => 0,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages currently flagged dislike.
    #[must_use]
    pub fn dislike_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|msg| msg.reaction == Some(Reaction::Dislike))
            .count()
    }
}
