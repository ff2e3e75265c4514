//! Content classifier.
//!
//! Maps a record's declared media kind plus its payload shape to exactly one
//! render strategy. The mapping is total and deterministic: every kind and
//! payload combination lands on one strategy, and link classification runs
//! the resolver ladder in fixed priority order.

use pafolio_core::models::MediaKind;

use crate::payload::Payload;
use crate::resolvers::{resolve_link, LinkTarget};

/// How one record gets rendered. Exactly one strategy per record.
///
/// `UnsupportedDownloadOnly` and a blank `GenericFrame` are documented
/// degraded outcomes, not failures: word-processor binaries cannot be
/// rendered client-side, so the only sound policy is offering the download
/// and recommending the drive route instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStrategy {
    /// Render the payload directly as an image (inline or URL).
    NativeImage,
    /// Render the payload directly as a video source.
    NativeVideo,
    /// Decode the inline document and preview it from a local handle.
    LocalDocumentPreview,
    /// Route the external document through the third-party viewer.
    RemoteDocumentPreview,
    /// Embed the video host's player.
    VideoEmbed,
    /// Embed the drive host's preview template.
    DriveEmbed,
    /// Render a direct image link.
    ImageEmbed,
    /// Frame the arbitrary site, with an open-externally escape hatch.
    GenericFrame,
    /// No preview possible; offer the raw payload for download.
    UnsupportedDownloadOnly,
}

/// Select the render strategy for a declared kind and payload.
pub fn strategy_for(kind: MediaKind, payload: &Payload<'_>) -> RenderStrategy {
    match kind {
        MediaKind::Image => RenderStrategy::NativeImage,
        MediaKind::Video => RenderStrategy::NativeVideo,
        MediaKind::DocumentPdf => {
            if payload.is_inline() {
                RenderStrategy::LocalDocumentPreview
            } else {
                RenderStrategy::RemoteDocumentPreview
            }
        }
        MediaKind::DocumentWord => {
            if payload.is_inline() {
                RenderStrategy::UnsupportedDownloadOnly
            } else {
                RenderStrategy::RemoteDocumentPreview
            }
        }
        MediaKind::Link => match resolve_link(payload.raw()) {
            LinkTarget::Video(_) => RenderStrategy::VideoEmbed,
            LinkTarget::Drive(_) => RenderStrategy::DriveEmbed,
            LinkTarget::Image => RenderStrategy::ImageEmbed,
            LinkTarget::Generic => RenderStrategy::GenericFrame,
        },
    }
}
