//! Upload intake.
//!
//! A small state machine over one submission: pick a kind, stage a file or a
//! link, submit. File bytes are encoded with the same data-URI convention
//! the preview decoder parses, and the encoded length is capped by the
//! spreadsheet collaborator's cell limit; the ceiling is a backend
//! constraint, not a property of the files themselves.

use base64::Engine;
use chrono::Utc;
use uuid::Uuid;

use pafolio_core::constants::{DEFAULT_CAPTION, MAX_ENCODED_PAYLOAD_CHARS};
use pafolio_core::models::{MediaKind, UploadRecord};

use crate::portfolio::{Portfolio, PortfolioError};

/// Where a submission is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeState {
    SelectingType,
    Composing,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Paste a link to the evidence first")]
    MissingUrl,

    #[error("Choose a file to attach first")]
    MissingFile,

    #[error(
        "The encoded file is {encoded_len} characters, over the backend's {max}-character \
         limit; upload it to the drive host and attach the link instead"
    )]
    PayloadTooLarge { encoded_len: usize, max: usize },

    #[error("A submission is already in progress")]
    Busy,

    #[error("Saving failed: {0}")]
    Write(#[source] PortfolioError),
}

/// A file the user picked, as raw bytes.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// One submission in progress for one indicator.
#[derive(Debug)]
pub struct IntakeSession {
    indicator_id: String,
    state: IntakeState,
    kind: MediaKind,
    staged_file: Option<StagedFile>,
    url_input: String,
    caption: String,
}

impl IntakeSession {
    /// Start a session. Link is the default kind: it is the most reliable
    /// route given the backend's payload ceiling.
    pub fn new(indicator_id: impl Into<String>) -> Self {
        IntakeSession {
            indicator_id: indicator_id.into(),
            state: IntakeState::SelectingType,
            kind: MediaKind::Link,
            staged_file: None,
            url_input: String::new(),
            caption: String::new(),
        }
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Pick the declared kind. Switching kinds discards any staged file or
    /// URL so stale input from the previous kind cannot leak into the record.
    pub fn select_kind(&mut self, kind: MediaKind) {
        self.kind = kind;
        self.staged_file = None;
        self.url_input.clear();
        self.state = IntakeState::Composing;
    }

    pub fn stage_file(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.staged_file = Some(StagedFile {
            name: name.into(),
            bytes,
        });
        self.state = IntakeState::Composing;
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url_input = url.into();
        self.state = IntakeState::Composing;
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    /// File name of the staged file, for caption hints.
    pub fn file_name_hint(&self) -> &str {
        self.staged_file
            .as_ref()
            .map(|f| f.name.as_str())
            .unwrap_or(if self.url_input.is_empty() {
                "no file selected"
            } else {
                "external link"
            })
    }

    /// Validate the composed input and build the normalized record.
    fn build_record(&self) -> Result<UploadRecord, IntakeError> {
        let payload = if self.kind.is_file_kind() {
            let staged = self.staged_file.as_ref().ok_or(IntakeError::MissingFile)?;
            let encoded = encode_data_uri(&content_type_for(&staged.name, self.kind), &staged.bytes);
            ensure_within_ceiling(&encoded)?;
            encoded
        } else {
            let url = self.url_input.trim();
            if url.is_empty() {
                return Err(IntakeError::MissingUrl);
            }
            url.to_string()
        };

        let caption = if self.caption.trim().is_empty() {
            DEFAULT_CAPTION.to_string()
        } else {
            self.caption.trim().to_string()
        };

        let thumbnail_url = match self.kind {
            MediaKind::Image => Some(payload.clone()),
            _ => None,
        };

        Ok(UploadRecord {
            id: Uuid::new_v4(),
            indicator_id: self.indicator_id.clone(),
            payload,
            media_kind: self.kind,
            created_at: Utc::now(),
            caption,
            thumbnail_url,
        })
    }

    /// Submit the composed record through the orchestrator.
    ///
    /// Validation failures revert Submitting back to Composing; a busy
    /// orchestrator does the same (the trigger should have been disabled).
    /// Collaborator failures land in Failed; the orchestrator has already
    /// reverted its optimistic state by then.
    pub async fn submit(&mut self, portfolio: &Portfolio) -> Result<UploadRecord, IntakeError> {
        self.state = IntakeState::Submitting;

        let record = match self.build_record() {
            Ok(record) => record,
            Err(e) => {
                self.state = IntakeState::Composing;
                return Err(e);
            }
        };

        match portfolio.create(record.clone()).await {
            Ok(()) => {
                self.state = IntakeState::Succeeded;
                self.staged_file = None;
                self.url_input.clear();
                self.caption.clear();
                Ok(record)
            }
            Err(PortfolioError::Busy) => {
                self.state = IntakeState::Composing;
                Err(IntakeError::Busy)
            }
            Err(e) => {
                self.state = IntakeState::Failed;
                Err(IntakeError::Write(e))
            }
        }
    }
}

/// Encode file bytes with the inline data-URI convention the decoder parses.
pub fn encode_data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        content_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Enforce the backend's cell limit on the encoded payload.
fn ensure_within_ceiling(encoded: &str) -> Result<(), IntakeError> {
    if encoded.len() > MAX_ENCODED_PAYLOAD_CHARS {
        return Err(IntakeError::PayloadTooLarge {
            encoded_len: encoded.len(),
            max: MAX_ENCODED_PAYLOAD_CHARS,
        });
    }
    Ok(())
}

/// Content type for a staged file, from its extension with a per-kind
/// fallback.
fn content_type_for(file_name: &str, kind: MediaKind) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let known = match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "mov" => Some("video/quicktime"),
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    };

    let fallback = match kind {
        MediaKind::Image => "image/png",
        MediaKind::Video => "video/mp4",
        MediaKind::DocumentPdf => "application/pdf",
        MediaKind::DocumentWord => "application/msword",
        MediaKind::Link => "application/octet-stream",
    };

    known.unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settle::SettlePolicy;
    use async_trait::async_trait;
    use pafolio_store::{StoreError, StoreResult, UploadStore};
    use std::sync::Arc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStore {
        records: Mutex<Vec<UploadRecord>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl UploadStore for FakeStore {
        async fn list(&self) -> StoreResult<Vec<UploadRecord>> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn create(&self, record: &UploadRecord) -> StoreResult<()> {
            if self.fail_writes {
                return Err(StoreError::Endpoint { status: 500 });
            }
            self.records.lock().unwrap().insert(0, record.clone());
            Ok(())
        }

        async fn delete(&self, _id: &str) -> StoreResult<()> {
            Ok(())
        }

        fn publish_target(&self) -> Option<String> {
            None
        }
    }

    fn portfolio() -> Portfolio {
        Portfolio::new(Arc::new(FakeStore::default()), SettlePolicy::immediate())
    }

    #[tokio::test]
    async fn link_submission_requires_a_url() {
        let p = portfolio();
        let mut session = IntakeSession::new("d1-1");
        session.select_kind(MediaKind::Link);

        let err = session.submit(&p).await.unwrap_err();
        assert!(matches!(err, IntakeError::MissingUrl));
        assert_eq!(session.state(), IntakeState::Composing);
        assert!(p.records().await.is_empty());
    }

    #[tokio::test]
    async fn file_submission_requires_a_staged_file() {
        let p = portfolio();
        let mut session = IntakeSession::new("d1-1");
        session.select_kind(MediaKind::DocumentPdf);

        let err = session.submit(&p).await.unwrap_err();
        assert!(matches!(err, IntakeError::MissingFile));
        assert_eq!(session.state(), IntakeState::Composing);
    }

    #[tokio::test]
    async fn successful_submission_normalizes_the_record() {
        let p = portfolio();
        let mut session = IntakeSession::new("d1-4");
        session.select_kind(MediaKind::Image);
        session.stage_file("lesson.png", vec![0x89, 0x50, 0x4e, 0x47]);

        let record = session.submit(&p).await.unwrap();
        assert_eq!(session.state(), IntakeState::Succeeded);
        assert_eq!(record.indicator_id, "d1-4");
        assert_eq!(record.media_kind, MediaKind::Image);
        assert!(record.payload.starts_with("data:image/png;base64,"));
        // Empty caption becomes the default; images carry a thumbnail.
        assert_eq!(record.caption, DEFAULT_CAPTION);
        assert_eq!(record.thumbnail_url.as_deref(), Some(record.payload.as_str()));
        assert_eq!(p.records().await.len(), 1);
    }

    #[tokio::test]
    async fn switching_kinds_discards_staged_input() {
        let p = portfolio();
        let mut session = IntakeSession::new("d1-1");
        session.select_kind(MediaKind::DocumentPdf);
        session.stage_file("report.pdf", b"%PDF-1.4".to_vec());

        session.select_kind(MediaKind::Link);
        // The staged PDF is gone, so a link submit without a URL fails.
        let err = session.submit(&p).await.unwrap_err();
        assert!(matches!(err, IntakeError::MissingUrl));
    }

    #[tokio::test]
    async fn store_failure_lands_in_failed_state() {
        let p = Portfolio::new(
            Arc::new(FakeStore {
                fail_writes: true,
                ..Default::default()
            }),
            SettlePolicy::immediate(),
        );
        let mut session = IntakeSession::new("d1-1");
        session.select_kind(MediaKind::Link);
        session.set_url("https://example.com/evidence");

        let err = session.submit(&p).await.unwrap_err();
        assert!(matches!(err, IntakeError::Write(_)));
        assert_eq!(session.state(), IntakeState::Failed);
        // The orchestrator reverted its optimistic append.
        assert!(p.records().await.is_empty());
    }

    #[test]
    fn ceiling_is_exercised_at_the_exact_boundary() {
        let at_limit = "x".repeat(MAX_ENCODED_PAYLOAD_CHARS);
        assert!(ensure_within_ceiling(&at_limit).is_ok());

        let under = "x".repeat(44_999);
        assert!(ensure_within_ceiling(&under).is_ok());

        let over = "x".repeat(45_001);
        let err = ensure_within_ceiling(&over).unwrap_err();
        assert!(matches!(
            err,
            IntakeError::PayloadTooLarge {
                encoded_len: 45_001,
                max: MAX_ENCODED_PAYLOAD_CHARS,
            }
        ));
    }

    #[tokio::test]
    async fn oversized_files_are_rejected_with_the_size_error() {
        let p = portfolio();
        let mut session = IntakeSession::new("d1-1");
        session.select_kind(MediaKind::DocumentPdf);
        // ~40 KB of raw bytes encodes past the 45,000-character ceiling.
        session.stage_file("big.pdf", vec![0u8; 40_000]);

        let err = session.submit(&p).await.unwrap_err();
        assert!(matches!(err, IntakeError::PayloadTooLarge { .. }));
        assert_eq!(session.state(), IntakeState::Composing);
        assert!(p.records().await.is_empty());
    }

    #[test]
    fn encoding_matches_the_decoder_convention() {
        let encoded = encode_data_uri("application/pdf", b"%PDF-1.4");
        assert_eq!(encoded, "data:application/pdf;base64,JVBERi0xLjQ=");
    }

    #[test]
    fn content_type_follows_extension_then_kind() {
        assert_eq!(content_type_for("a.JPG", MediaKind::Image), "image/jpeg");
        assert_eq!(content_type_for("clip.mov", MediaKind::Video), "video/quicktime");
        assert_eq!(
            content_type_for("report.docx", MediaKind::DocumentWord),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        // Unknown extension: fall back to the declared kind.
        assert_eq!(content_type_for("scan", MediaKind::DocumentPdf), "application/pdf");
    }
}
