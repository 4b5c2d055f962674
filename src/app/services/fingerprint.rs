//! Content fingerprints used as path-independent document identity.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::app::domain::document::DocumentView;

/// Lowercase hex SHA-256 of a document's trimmed leading text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint already-extracted leading text. Returns `None` when nothing
/// but whitespace is left after trimming.
pub fn fingerprint_text(prefix: &str) -> Option<Fingerprint> {
    let trimmed = prefix.trim();
    if trimmed.is_empty() {
        return None;
    }
    let digest = Sha256::digest(trimmed.as_bytes());
    Some(Fingerprint(hex::encode(digest)))
}

/// Fingerprint the first `window` bytes of a document. Shorter documents are
/// hashed whole.
pub fn fingerprint_view<V: DocumentView + ?Sized>(view: &V, window: usize) -> Option<Fingerprint> {
    let end = window.min(view.size());
    fingerprint_text(&view.substr(0..end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::document::DocumentId;
    use crate::app::infrastructure::memory_view::MemoryView;

    #[test]
    fn test_known_digest() {
        // sha256("abc")
        let fp = fingerprint_text("  abc\n").unwrap();
        assert_eq!(
            fp.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(fp.to_string().len(), 64);
    }

    #[test]
    fn test_whitespace_only_has_no_fingerprint() {
        assert!(fingerprint_text("").is_none());
        assert!(fingerprint_text(" \n\t \r\n").is_none());
    }

    #[test]
    fn test_path_independent() {
        let text = "Chapter 1\n".repeat(2000);
        let a = MemoryView::new(DocumentId(1), Some("/a/book.txt"), &text);
        let b = MemoryView::new(DocumentId(2), Some("/elsewhere/copy.txt"), &text);
        let c = MemoryView::new(DocumentId(3), None, &text);
        let fp = fingerprint_view(&a, 10240);
        assert!(fp.is_some());
        assert_eq!(fp, fingerprint_view(&b, 10240));
        assert_eq!(fp, fingerprint_view(&c, 10240));
    }

    #[test]
    fn test_only_prefix_counts() {
        let head = "x".repeat(10240);
        let a = MemoryView::new(DocumentId(1), None, &format!("{}tail one", head));
        let b = MemoryView::new(DocumentId(2), None, &format!("{}another tail", head));
        assert_eq!(fingerprint_view(&a, 10240), fingerprint_view(&b, 10240));
    }

    #[test]
    fn test_short_document_hashed_whole() {
        let view = MemoryView::new(DocumentId(1), None, "short text");
        assert_eq!(
            fingerprint_view(&view, 10240),
            fingerprint_text("short text")
        );
    }

    #[test]
    fn test_leading_whitespace_ignored() {
        let a = MemoryView::new(DocumentId(1), None, "\n\n   body");
        let b = MemoryView::new(DocumentId(2), None, "body");
        assert_eq!(fingerprint_view(&a, 10240), fingerprint_view(&b, 10240));
    }
}
