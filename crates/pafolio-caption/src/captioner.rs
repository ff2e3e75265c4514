//! Caption collaborator abstraction.

use async_trait::async_trait;

/// Returned when no credential is configured for the caption collaborator.
pub const CAPTION_KEY_MISSING: &str =
    "AI captions are not configured. Set GEMINI_API_KEY to enable them.";

/// Returned when the collaborator call fails for any reason.
pub const CAPTION_UNAVAILABLE: &str = "A caption could not be generated right now.";

/// Suggests captions for evidence items.
///
/// `suggest` is infallible by contract: implementations map missing
/// credentials to [`CAPTION_KEY_MISSING`] and remote failures to
/// [`CAPTION_UNAVAILABLE`] instead of erroring.
#[async_trait]
pub trait Captioner: Send + Sync {
    async fn suggest(
        &self,
        indicator_title: &str,
        file_name_hint: &str,
        existing_notes: &str,
    ) -> String;
}
