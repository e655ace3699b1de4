//! Conversation feedback tracking and support escalation.
//!
//! DESIGN
//! ======
//! The monitor consumes the signed dislike deltas reported by the message
//! log instead of recounting the log, so it never needs to see storage.
//! Escalation is monotonic: it fires exactly once per session the first
//! time the counter rises above the threshold, and a later drop below the
//! threshold never re-arms it.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

/// Dislike count a conversation may reach before escalation fires.
pub const DISLIKE_THRESHOLD: u32 = 2;

/// One-time system message offering human support.
pub const ESCALATION_MESSAGE: &str = "We're sorry that you're not finding this conversation helpful. Would you like to talk to a customer support representative?";

/// Derives the poor-conversation signal from accumulated dislikes.
#[derive(Clone, Debug, Default)]
pub struct FeedbackMonitor {
    dislikes: u32,
    escalated: bool,
}

impl FeedbackMonitor {
    /// Apply a signed dislike delta. Returns the escalation message the
    /// first time the counter strictly exceeds [`DISLIKE_THRESHOLD`], and
    /// `None` on every other call. The counter floors at zero.
    pub fn observe(&mut self, delta: i32) -> Option<&'static str> {
        self.dislikes = self.dislikes.saturating_add_signed(delta);
        if self.dislikes > DISLIKE_THRESHOLD && !self.escalated {
            self.escalated = true;
            log::info!("conversation escalated after {} dislikes", self.dislikes);
            return Some(ESCALATION_MESSAGE);
        }
        None
    }

    #[must_use]
    pub fn dislikes(&self) -> u32 {
        self.dislikes
    }

    #[must_use]
    pub fn escalated(&self) -> bool {
        self.escalated
    }
}
