use std::collections::HashMap;
use std::ops::Range;
use std::time::Duration;

use crate::app::domain::document::{DocumentId, DocumentSettings, DocumentView, Viewport};
use crate::app::services::text_ops::clamp_range;

/// Default number of bytes a fresh view shows.
const DEFAULT_VIEW_HEIGHT: usize = 2000;

/// A `DocumentView` backed by a `String`.
///
/// Every command the controller issues is applied and also recorded, so a
/// host (or a test) can replay what happened: scrolls in `scroll_log`,
/// settle requests in `settle_requests`, syntax changes in `syntax_history`.
#[derive(Debug, Clone)]
pub struct MemoryView {
    id: DocumentId,
    file_path: Option<String>,
    text: String,
    syntax: String,
    encoding: String,
    read_only: bool,
    viewport: Viewport,
    caret: usize,
    settings: DocumentSettings,
    status: HashMap<String, String>,
    pub scroll_log: Vec<(usize, bool)>,
    pub settle_requests: Vec<Duration>,
    pub syntax_history: Vec<String>,
}

impl MemoryView {
    pub fn new(id: DocumentId, file_path: Option<&str>, text: &str) -> Self {
        Self {
            id,
            file_path: file_path.map(str::to_string),
            text: text.to_string(),
            syntax: String::new(),
            encoding: "UTF-8".to_string(),
            read_only: false,
            viewport: Viewport::new(0, DEFAULT_VIEW_HEIGHT.min(text.len())),
            caret: 0,
            settings: DocumentSettings::new(),
            status: HashMap::new(),
            scroll_log: Vec::new(),
            settle_requests: Vec::new(),
            syntax_history: Vec::new(),
        }
    }

    pub fn with_syntax(mut self, syntax: &str) -> Self {
        self.syntax = syntax.to_string();
        self
    }

    pub fn with_encoding(mut self, encoding: &str) -> Self {
        self.encoding = encoding.to_string();
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn set_encoding(&mut self, encoding: &str) {
        self.encoding = encoding.to_string();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Insert text at the end, as an edit or a re-decode would.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn status(&self, key: &str) -> Option<&str> {
        self.status.get(key).map(String::as_str)
    }

    fn clamp(&self, offset: usize) -> usize {
        offset.min(self.text.len())
    }
}

impl DocumentView for MemoryView {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    fn size(&self) -> usize {
        self.text.len()
    }

    fn syntax(&self) -> &str {
        &self.syntax
    }

    fn set_syntax(&mut self, syntax: &str) {
        self.syntax = syntax.to_string();
        self.syntax_history.push(syntax.to_string());
    }

    fn encoding(&self) -> &str {
        &self.encoding
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn visible_region(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, offset: usize, show_at_top: bool) {
        self.scroll_log.push((offset, show_at_top));
        let offset = self.clamp(offset);
        let height = self.viewport.end.saturating_sub(self.viewport.begin);
        if show_at_top {
            self.viewport = Viewport::new(offset, self.clamp(offset + height));
        } else if offset < self.viewport.begin {
            self.viewport = Viewport::new(offset, self.clamp(offset + height));
        } else if offset > self.viewport.end {
            self.viewport = Viewport::new(offset.saturating_sub(height), offset);
        }
    }

    fn set_caret(&mut self, offset: usize) {
        self.caret = self.clamp(offset);
    }

    fn substr(&self, range: Range<usize>) -> String {
        self.text[clamp_range(&self.text, range)].to_string()
    }

    fn settings(&self) -> &DocumentSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut DocumentSettings {
        &mut self.settings
    }

    fn set_status(&mut self, key: &str, message: &str) {
        self.status.insert(key.to_string(), message.to_string());
    }

    fn erase_status(&mut self, key: &str) {
        self.status.remove(key);
    }

    fn request_settle(&mut self, delay: Duration) {
        self.settle_requests.push(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substr_clamps_to_char_boundaries() {
        let view = MemoryView::new(DocumentId(1), None, "añb");
        assert_eq!(view.substr(0..2), "a");
        assert_eq!(view.substr(0..3), "añ");
        assert_eq!(view.substr(1..100), "ñb");
    }

    #[test]
    fn test_scroll_to_top_moves_viewport() {
        let text = "x".repeat(5000);
        let mut view =
            MemoryView::new(DocumentId(1), None, &text).with_viewport(Viewport::new(0, 300));
        view.scroll_to(1000, false);
        assert_eq!(view.visible_region(), Viewport::new(700, 1000));
        view.scroll_to(100, true);
        assert_eq!(view.visible_region(), Viewport::new(100, 400));
        assert_eq!(view.scroll_log, vec![(1000, false), (100, true)]);
    }

    #[test]
    fn test_scroll_within_view_keeps_viewport() {
        let text = "x".repeat(5000);
        let mut view =
            MemoryView::new(DocumentId(1), None, &text).with_viewport(Viewport::new(0, 300));
        view.scroll_to(150, false);
        assert_eq!(view.visible_region(), Viewport::new(0, 300));
    }

    #[test]
    fn test_append_grows_document() {
        let mut view = MemoryView::new(DocumentId(1), None, "abc");
        view.append("def");
        assert_eq!(view.text(), "abcdef");
        assert_eq!(view.size(), 6);
    }

    #[test]
    fn test_status_and_caret() {
        let mut view = MemoryView::new(DocumentId(1), Some("/a.txt"), "hello");
        view.set_status("k", "busy");
        assert_eq!(view.status("k"), Some("busy"));
        view.erase_status("k");
        assert_eq!(view.status("k"), None);

        view.set_caret(99);
        assert_eq!(view.caret(), 5);
        assert_eq!(view.file_path(), Some("/a.txt"));
    }
}
