//! Payload shape parsing.
//!
//! A record payload is one of two mutually exclusive encodings, distinguished
//! by prefix convention: an inline data URI
//! (`data:<media-type>;base64,<body>`) or an external URL string.

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Parsed shape of a raw payload string. Borrowed; records own the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Self-contained inline payload carrying its own media type.
    Inline(InlinePayload<'a>),
    /// External URL whose content lives elsewhere.
    External(&'a str),
}

impl<'a> Payload<'a> {
    /// Classify a raw payload by its prefix. Total; never fails.
    pub fn parse(raw: &'a str) -> Payload<'a> {
        if raw.starts_with(DATA_PREFIX) {
            Payload::Inline(InlinePayload { raw })
        } else {
            Payload::External(raw)
        }
    }

    /// The underlying string, whatever the shape.
    pub fn raw(&self) -> &'a str {
        match self {
            Payload::Inline(inline) => inline.raw,
            Payload::External(url) => url,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Payload::Inline(_))
    }
}

/// An inline data-URI payload. Structural access only; decoding lives in
/// [`crate::preview::PreviewWorkshop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlinePayload<'a> {
    raw: &'a str,
}

impl<'a> InlinePayload<'a> {
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Declared media type (`application/pdf`, `image/png`, ...), if the
    /// data URI is well formed.
    pub fn media_type(&self) -> Option<&'a str> {
        let rest = self.raw.strip_prefix(DATA_PREFIX)?;
        let end = rest.find(BASE64_MARKER)?;
        Some(&rest[..end])
    }

    /// The base64 body after the `;base64,` marker, if present.
    pub fn body(&self) -> Option<&'a str> {
        let marker = self.raw.find(BASE64_MARKER)?;
        Some(&self.raw[marker + BASE64_MARKER.len()..])
    }
}
