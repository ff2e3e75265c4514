//! Direct image-link predicate.

/// File extensions treated as directly renderable images.
const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "gif", "png", "webp", "svg", "bmp"];

/// Whether a URL points at an image by file extension.
///
/// The query string is stripped first; the remaining suffix is matched
/// case-insensitively against the fixed extension set.
pub fn is_image_link(url: &str) -> bool {
    let path = url.split('?').next().unwrap_or(url);
    let Some((_, ext)) = path.rsplit_once('.') else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_match() {
        for ext in ["jpeg", "jpg", "gif", "png", "webp", "svg", "bmp"] {
            assert!(
                is_image_link(&format!("https://cdn.example.com/photo.{ext}")),
                "extension {ext} should match"
            );
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_image_link("https://cdn.example.com/photo.PNG"));
        assert!(is_image_link("https://cdn.example.com/photo.JpG"));
    }

    #[test]
    fn query_string_is_ignored() {
        assert!(is_image_link("https://cdn.example.com/photo.png?w=800&h=600"));
        // The extension must be on the path, not in the query.
        assert!(!is_image_link("https://cdn.example.com/render?file=photo.png"));
    }

    #[test]
    fn non_image_urls_do_not_match() {
        assert!(!is_image_link("https://example.com/report.pdf"));
        assert!(!is_image_link("https://example.com/photos"));
        assert!(!is_image_link("https://example.com/photo.png.html"));
    }
}
