use std::collections::HashMap;
use std::ops::Range;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key the external encoding detector writes once it knows the real encoding.
pub const ORIGIN_ENCODING_KEY: &str = "origin_encoding";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// Visible region of a document, as begin/end offsets.
///
/// Persisted as a two-element array `[begin, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Viewport {
    pub begin: usize,
    pub end: usize,
}

impl Viewport {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Caret position used when restoring: halfway between begin and end.
    pub fn midpoint(&self) -> usize {
        self.begin / 2 + self.end / 2 + (self.begin % 2 + self.end % 2) / 2
    }
}

impl From<[usize; 2]> for Viewport {
    fn from(pair: [usize; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Viewport> for [usize; 2] {
    fn from(viewport: Viewport) -> Self {
        [viewport.begin, viewport.end]
    }
}

/// Per-document key/value bag owned by the host. Lives as long as the
/// document is open and is never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSettings {
    values: HashMap<String, Value>,
}

impl DocumentSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn erase(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// True when the key holds something other than null, false, zero or an
    /// empty string/collection.
    pub fn is_set(&self, key: &str) -> bool {
        match self.values.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }
}

/// The host editor's view of one open document.
///
/// Offsets are byte offsets into the document text. Implementations are
/// expected to clamp out-of-range values rather than panic.
pub trait DocumentView {
    fn id(&self) -> DocumentId;

    /// Backing file, or `None` for an unsaved buffer.
    fn file_path(&self) -> Option<&str>;

    /// Size of the document in bytes.
    fn size(&self) -> usize;

    /// Identifier of the syntax currently assigned to the document.
    fn syntax(&self) -> &str;
    fn set_syntax(&mut self, syntax: &str);

    /// Name of the encoding the host resolved when loading the file.
    fn encoding(&self) -> &str;

    fn is_read_only(&self) -> bool;
    fn set_read_only(&mut self, read_only: bool);

    fn visible_region(&self) -> Viewport;

    /// Scroll so that `offset` is visible. With `show_at_top` the line holding
    /// `offset` is placed at the top of the view.
    fn scroll_to(&mut self, offset: usize, show_at_top: bool);

    /// Replace the selection with a single caret at `offset`.
    fn set_caret(&mut self, offset: usize);

    fn substr(&self, range: Range<usize>) -> String;

    fn settings(&self) -> &DocumentSettings;
    fn settings_mut(&mut self) -> &mut DocumentSettings;

    fn set_status(&mut self, key: &str, message: &str);
    fn erase_status(&mut self, key: &str);

    /// Ask the host to deliver `on_settled` for this document after `delay`,
    /// once pending layout work has been applied. A host with synchronous
    /// layout may deliver it immediately after the current event returns.
    fn request_settle(&mut self, delay: Duration);
}
