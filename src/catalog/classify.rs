//! Content-type classification

use super::artifact::{ArtifactKind, RawFile};

const PDF_CONTENT_TYPE: &str = "application/pdf";
const IMAGE_PREFIX: &str = "image/";

/// Map a file's declared content type to an artifact kind
///
/// Returns `None` for unsupported types. Only the declared type is
/// consulted; the payload is never sniffed. MIME types are case-insensitive
/// and may carry parameters (`image/png; charset=binary`).
pub fn classify(file: &RawFile) -> Option<ArtifactKind> {
    classify_content_type(&file.content_type)
}

pub(crate) fn classify_content_type(content_type: &str) -> Option<ArtifactKind> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == PDF_CONTENT_TYPE {
        Some(ArtifactKind::Document)
    } else if essence.len() > IMAGE_PREFIX.len() && essence.starts_with(IMAGE_PREFIX) {
        Some(ArtifactKind::Image)
    } else {
        None
    }
}
