//! Binary decoder and revocable preview handles.
//!
//! Inline payloads carry their bytes as a base64 data URI. Previewing one
//! means decoding the body into a locally addressable file and handing the
//! caller an owned [`PreviewHandle`]. The handle controls the file's
//! lifetime: `release` removes it, and dropping an unreleased handle removes
//! it as a backstop, so a replaced or torn-down view cannot leak previews.
//!
//! Handles are not interned. Decoding the same payload twice yields two
//! independent files, each released on its own.

use base64::Engine;
use bytes::Bytes;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::payload::{InlinePayload, Payload};

/// Binary decoding errors. Surfaced as a per-item "cannot prepare preview"
/// state; never fatal to the gallery.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Payload does not carry the inline data-URI prefix")]
    MissingPrefix,

    #[error("Invalid base64 body: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decoder rooted at a working directory for preview files.
#[derive(Debug, Clone)]
pub struct PreviewWorkshop {
    root: PathBuf,
}

impl PreviewWorkshop {
    /// Create a workshop, ensuring its root directory exists.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, DecodeError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(PreviewWorkshop { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decode a raw payload string into a fresh preview handle.
    ///
    /// Fails with [`DecodeError::MissingPrefix`] when the payload does not
    /// follow the `data:<media-type>;base64,<body>` convention and with
    /// [`DecodeError::InvalidBase64`] on a corrupt body. On failure no file
    /// is created and no partial handle exists.
    pub fn decode(&self, raw: &str) -> Result<PreviewHandle, DecodeError> {
        let Payload::Inline(inline) = Payload::parse(raw) else {
            return Err(DecodeError::MissingPrefix);
        };
        self.decode_inline(&inline)
    }

    /// Decode an already-parsed inline payload.
    pub fn decode_inline(&self, inline: &InlinePayload<'_>) -> Result<PreviewHandle, DecodeError> {
        let media_type = inline.media_type().ok_or(DecodeError::MissingPrefix)?;
        let body = inline.body().ok_or(DecodeError::MissingPrefix)?;

        let bytes = Bytes::from(base64::engine::general_purpose::STANDARD.decode(body)?);

        let path = self
            .root
            .join(format!("{}.{}", Uuid::new_v4(), extension_for(media_type)));
        fs::write(&path, &bytes)?;

        tracing::debug!(
            path = %path.display(),
            media_type = %media_type,
            size_bytes = bytes.len(),
            "Decoded inline payload into preview file"
        );

        Ok(PreviewHandle {
            path,
            media_type: media_type.to_string(),
            len: bytes.len(),
            released: false,
        })
    }
}

/// File extension for a decoded preview, for friendlier local URIs.
fn extension_for(media_type: &str) -> &'static str {
    match media_type {
        "application/pdf" => "pdf",
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        _ => "bin",
    }
}

/// An owned, revocable preview: a decoded file plus the obligation to remove
/// it. Release is idempotent per handle because `release` consumes the
/// handle; two handles for the same payload are independent.
#[derive(Debug)]
pub struct PreviewHandle {
    path: PathBuf,
    media_type: String,
    len: usize,
    released: bool,
}

impl PreviewHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Locally addressable URI for the decoded content.
    pub fn uri(&self) -> String {
        format!("file://{}", self.path.display())
    }

    /// Remove the backing file. Consumes the handle, so it can only happen
    /// once per handle.
    pub fn release(mut self) -> Result<(), DecodeError> {
        self.released = true;
        fs::remove_file(&self.path)?;
        Ok(())
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "Preview file already gone at teardown"
                );
            }
        }
    }
}
