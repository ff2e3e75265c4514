//! Video-host resolver.
//!
//! Recognizes the host's short-link, embed-link, and watch-link shapes and
//! extracts the 11-character video identifier.

use regex::Regex;
use std::sync::OnceLock;

/// Video ids are exactly this long; anything else is not an id.
const VIDEO_ID_LEN: usize = 11;

static VIDEO_ID_RE: OnceLock<Regex> = OnceLock::new();

fn video_id_re() -> &'static Regex {
    VIDEO_ID_RE.get_or_init(|| {
        Regex::new(r"(?:youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*)")
            .expect("hard-coded pattern compiles")
    })
}

/// A resolved video reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YoutubeVideo {
    id: String,
}

impl YoutubeVideo {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Embeddable player URL for this video.
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.id)
    }
}

/// Match a URL against the recognized video-host shapes.
///
/// Every recognized position is tried; the first one carrying an
/// 11-character identifier wins. URLs with no such position resolve to
/// `None`, including well-formed host URLs with a truncated id.
pub fn resolve(url: &str) -> Option<YoutubeVideo> {
    video_id_re()
        .captures_iter(url)
        .map(|caps| caps[1].to_string())
        .find(|id| id.len() == VIDEO_ID_LEN)
        .map(|id| YoutubeVideo { id })
}
