//! # chat
//!
//! Session orchestration and response interpretation for the dual-model
//! chat workspace: the ordered message log with reaction state, the
//! feedback escalation monitor, stream-frame reply assembly and hex color
//! extraction, the bounded-retry color fetch machine, and the coordinator
//! that fans one shared input line across both model-backed sessions.
//!
//! Browser transport, markup, and the forwarding server live in the
//! sibling `client` and `server` crates; everything here is plain state
//! and async logic behind the [`api::ChatApi`] seam, so it compiles for
//! both native and wasm targets and tests against recording mocks.

pub mod api;
pub mod color;
pub mod coordinator;
pub mod feedback;
pub mod message;
pub mod reply;
pub mod session;

pub use api::{ApiError, ChatApi, ChatRequest, ColorRequest, ModelVariant, WireMessage};
pub use color::{ColorFetch, ColorOutcome, ColorStep, FALLBACK_COLOR};
pub use coordinator::{DualSessionCoordinator, SubmitOutcome};
pub use feedback::FeedbackMonitor;
pub use message::{Media, MediaKind, Message, MessageLog, Reaction, Role};
pub use session::ChatSession;
