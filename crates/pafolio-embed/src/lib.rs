//! Pafolio Embed Library
//!
//! Content resolution and embedding: given an upload record whose payload is
//! either an inline data URI or an arbitrary external URL, decide how to
//! present it and produce a concrete render plan.
//!
//! The pipeline has three layers:
//!
//! - **Resolvers** (`resolvers`): pure URL pattern matchers for the video
//!   host, the drive host, and direct image links. No match is a value, not
//!   an error.
//! - **Classifier** (`classifier`): total mapping from `(media kind, payload
//!   shape)` to exactly one [`RenderStrategy`].
//! - **Plans** (`plan`): [`RenderPlan`] construction, including decoding
//!   inline payloads into revocable local preview files via the
//!   [`PreviewWorkshop`].
//!
//! Everything here is synchronous; the only side effects are the preview
//! files the workshop writes and releases.

pub mod classifier;
pub mod payload;
pub mod plan;
pub mod preview;
pub mod resolvers;

// Re-export commonly used types
pub use classifier::{strategy_for, RenderStrategy};
pub use payload::{InlinePayload, Payload};
pub use plan::{build_plan, RenderPlan};
pub use preview::{DecodeError, PreviewHandle, PreviewWorkshop};
