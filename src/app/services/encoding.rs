//! Checks around the cooperating encoding detector.

use std::path::{Path, PathBuf};

use crate::app::domain::document::{DocumentView, ORIGIN_ENCODING_KEY};

/// Encoding name the host reports when it could not decide.
pub const UNDEFINED_ENCODING: &str = "Undefined";

/// Whether the host has not settled on a real encoding yet.
pub fn is_undetermined(encoding: &str, fallback_encoding: &str) -> bool {
    encoding == UNDEFINED_ENCODING || encoding == fallback_encoding
}

/// Locates the external encoding detector by its install directory.
#[derive(Debug, Clone, Default)]
pub struct DetectorProbe {
    path: Option<PathBuf>,
}

impl DetectorProbe {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn at(path: impl AsRef<Path>) -> Self {
        Self::new(Some(path.as_ref().to_path_buf()))
    }

    pub fn is_installed(&self) -> bool {
        self.path.as_deref().is_some_and(Path::exists)
    }
}

/// True when entering reader mode should wait for the detector: the encoding
/// is still undetermined, a detector is installed, and it has not reported.
pub fn should_wait_for_detector<V: DocumentView + ?Sized>(
    view: &V,
    fallback_encoding: &str,
    probe: &DetectorProbe,
) -> bool {
    is_undetermined(view.encoding(), fallback_encoding)
        && probe.is_installed()
        && !view.settings().is_set(ORIGIN_ENCODING_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::document::DocumentId;
    use crate::app::infrastructure::memory_view::MemoryView;

    const FALLBACK: &str = "Western (Windows 1252)";

    #[test]
    fn test_is_undetermined() {
        assert!(is_undetermined("Undefined", FALLBACK));
        assert!(is_undetermined(FALLBACK, FALLBACK));
        assert!(!is_undetermined("UTF-8", FALLBACK));
    }

    #[test]
    fn test_probe_checks_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DetectorProbe::at(dir.path()).is_installed());
        assert!(!DetectorProbe::at(dir.path().join("ConvertToUTF8")).is_installed());
        assert!(!DetectorProbe::default().is_installed());
    }

    #[test]
    fn test_should_wait_for_detector() {
        let dir = tempfile::tempdir().unwrap();
        let probe = DetectorProbe::at(dir.path());
        let mut view = MemoryView::new(DocumentId(1), Some("/a.txt"), "text");

        view.set_encoding("UTF-8");
        assert!(!should_wait_for_detector(&view, FALLBACK, &probe));

        view.set_encoding(UNDEFINED_ENCODING);
        assert!(should_wait_for_detector(&view, FALLBACK, &probe));
        assert!(!should_wait_for_detector(&view, FALLBACK, &DetectorProbe::default()));

        view.settings_mut().set(ORIGIN_ENCODING_KEY, "GB18030");
        assert!(!should_wait_for_detector(&view, FALLBACK, &probe));
    }
}
