//! Render-plan construction.
//!
//! A [`RenderPlan`] pins down everything the gallery needs to present one
//! record: the strategy, the concrete target URI, and, for locally decoded
//! previews, ownership of the revocable handle backing that URI. Plans are
//! derived fresh on each render pass; dropping a plan (or replacing it in a
//! slot) releases any locally owned preview.

use pafolio_core::models::UploadRecord;

use crate::classifier::RenderStrategy;
use crate::payload::Payload;
use crate::preview::{DecodeError, PreviewHandle, PreviewWorkshop};
use crate::resolvers::{resolve_link, LinkTarget};

/// Third-party viewer used for external documents the browser cannot render
/// directly. Best effort: the viewer may come up blank, which the gallery
/// must show as-is rather than crash on.
fn document_viewer_url(url: &str) -> String {
    format!(
        "https://docs.google.com/viewer?url={}&embedded=true",
        urlencoding::encode(url)
    )
}

/// Concrete rendering decision for one record.
#[derive(Debug)]
pub struct RenderPlan {
    strategy: RenderStrategy,
    target_uri: String,
    /// False exactly when `target_uri` is backed by a locally owned preview
    /// handle this plan will release; true when the target's lifetime is
    /// owned elsewhere (provider URLs, the record's own payload).
    is_external: bool,
    preview: Option<PreviewHandle>,
}

impl RenderPlan {
    pub fn strategy(&self) -> RenderStrategy {
        self.strategy
    }

    pub fn target_uri(&self) -> &str {
        &self.target_uri
    }

    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// The locally owned preview backing this plan, when there is one.
    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    fn external(strategy: RenderStrategy, target_uri: String) -> RenderPlan {
        RenderPlan {
            strategy,
            target_uri,
            is_external: true,
            preview: None,
        }
    }
}

/// Build the render plan for a record.
///
/// Total over every `(media kind, payload)` combination except that decoding
/// an inline document payload can fail; the caller surfaces that as the
/// item's degraded state.
pub fn build_plan(
    record: &UploadRecord,
    workshop: &PreviewWorkshop,
) -> Result<RenderPlan, DecodeError> {
    let payload = Payload::parse(&record.payload);
    let strategy = crate::classifier::strategy_for(record.media_kind, &payload);

    let plan = match strategy {
        RenderStrategy::NativeImage | RenderStrategy::NativeVideo => {
            RenderPlan::external(strategy, record.payload.clone())
        }
        RenderStrategy::LocalDocumentPreview => {
            let handle = workshop.decode(&record.payload)?;
            RenderPlan {
                strategy,
                target_uri: handle.uri(),
                is_external: false,
                preview: Some(handle),
            }
        }
        RenderStrategy::RemoteDocumentPreview => {
            RenderPlan::external(strategy, document_viewer_url(payload.raw()))
        }
        RenderStrategy::VideoEmbed | RenderStrategy::DriveEmbed => {
            // The classifier only selects these when the ladder matched, so
            // re-running it cannot disagree; Generic is unreachable here but
            // handled total anyway.
            match resolve_link(payload.raw()) {
                LinkTarget::Video(video) => {
                    RenderPlan::external(RenderStrategy::VideoEmbed, video.embed_url())
                }
                LinkTarget::Drive(resource) => {
                    RenderPlan::external(RenderStrategy::DriveEmbed, resource.embed_url())
                }
                LinkTarget::Image => {
                    RenderPlan::external(RenderStrategy::ImageEmbed, record.payload.clone())
                }
                LinkTarget::Generic => {
                    RenderPlan::external(RenderStrategy::GenericFrame, record.payload.clone())
                }
            }
        }
        RenderStrategy::ImageEmbed | RenderStrategy::GenericFrame => {
            RenderPlan::external(strategy, record.payload.clone())
        }
        RenderStrategy::UnsupportedDownloadOnly => {
            RenderPlan::external(strategy, record.payload.clone())
        }
    };

    Ok(plan)
}
