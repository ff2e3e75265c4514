use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Media kind declared by the user at intake time.
///
/// The kind is never inferred from the payload; classification combines the
/// declared kind with the payload shape. Wire values match the spreadsheet
/// collaborator (`IMAGE`, `VIDEO`, `PDF`, `DOCX`, `LINK`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "IMAGE")]
    Image,
    #[serde(rename = "VIDEO")]
    Video,
    #[serde(rename = "PDF")]
    DocumentPdf,
    #[serde(rename = "DOCX")]
    DocumentWord,
    #[serde(rename = "LINK")]
    Link,
}

impl MediaKind {
    /// Wire token, also used for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "IMAGE",
            MediaKind::Video => "VIDEO",
            MediaKind::DocumentPdf => "PDF",
            MediaKind::DocumentWord => "DOCX",
            MediaKind::Link => "LINK",
        }
    }

    /// Parse a wire token. Case-sensitive; the collaborator stores uppercase.
    pub fn parse(s: &str) -> Option<MediaKind> {
        match s {
            "IMAGE" => Some(MediaKind::Image),
            "VIDEO" => Some(MediaKind::Video),
            "PDF" => Some(MediaKind::DocumentPdf),
            "DOCX" => Some(MediaKind::DocumentWord),
            "LINK" => Some(MediaKind::Link),
            _ => None,
        }
    }

    /// Whether this kind is backed by an uploaded file rather than a URL.
    pub fn is_file_kind(&self) -> bool {
        !matches!(self, MediaKind::Link)
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of evidence attached to an indicator.
///
/// Immutable once created; the only mutations are deletion and full replace.
/// The payload is either an inline data URI (`data:<media-type>;base64,<body>`)
/// or an external URL, distinguished by the `data:` prefix convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub id: Uuid,
    /// Indicator taxonomy key (e.g. `d1-4`). Not validated against the
    /// taxonomy here; unknown ids simply render under their raw key.
    #[serde(rename = "indicator")]
    pub indicator_id: String,
    #[serde(rename = "fileUrl")]
    pub payload: String,
    #[serde(rename = "fileType")]
    pub media_kind: MediaKind,
    #[serde(rename = "uploadDate")]
    pub created_at: DateTime<Utc>,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl UploadRecord {
    /// Whether the payload uses the inline data-URI convention.
    pub fn is_inline(&self) -> bool {
        self.payload.starts_with("data:")
    }
}
