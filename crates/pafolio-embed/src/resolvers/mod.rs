//! Identifier resolvers: pure URL pattern matchers for the providers the
//! gallery can embed. Each resolver returns `None` when the input does not
//! fit its provider's shapes; no resolver ever errors.

pub mod drive;
pub mod image;
pub mod youtube;

pub use drive::{DriveDocKind, DriveResource};
pub use youtube::YoutubeVideo;

/// Outcome of running the link resolver ladder over a URL.
///
/// Resolvers are consulted in fixed priority order (video host, then drive
/// host, then direct image link) and the first match wins; `Generic` is the
/// unconditional fallback, so the ladder is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Video(YoutubeVideo),
    Drive(DriveResource),
    Image,
    Generic,
}

/// Run the resolver ladder over a URL.
pub fn resolve_link(url: &str) -> LinkTarget {
    if let Some(video) = youtube::resolve(url) {
        return LinkTarget::Video(video);
    }
    if let Some(resource) = drive::resolve(url) {
        return LinkTarget::Drive(resource);
    }
    if image::is_image_link(url) {
        return LinkTarget::Image;
    }
    LinkTarget::Generic
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_prefers_video_over_drive() {
        // A video URL that also mentions the drive host in a query parameter
        // must still resolve as video: first match wins.
        let target = resolve_link("https://youtu.be/dQw4w9WgXcQ?ref=google.com/d/abc");
        assert!(matches!(target, LinkTarget::Video(_)));
    }

    #[test]
    fn ladder_falls_through_to_generic() {
        assert_eq!(resolve_link("https://example.com/blog"), LinkTarget::Generic);
    }

    #[test]
    fn ladder_detects_image_suffix_last() {
        assert_eq!(
            resolve_link("https://example.com/photo.png"),
            LinkTarget::Image
        );
    }
}
