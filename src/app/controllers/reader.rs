use std::collections::HashMap;

use crate::app::domain::document::{DocumentId, DocumentView, ORIGIN_ENCODING_KEY, Viewport};
use crate::app::domain::settings::{MIN_FILE_SIZE, ReaderSettings};
use crate::app::domain::state::ReaderState;
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::store::SettingsStore;
use crate::app::services::encoding::{DetectorProbe, should_wait_for_detector};
use crate::app::services::fingerprint::fingerprint_view;
use crate::app::services::text_ops::extract_filename;

/// Status key shown while the encoding detector is working.
pub const WAITING_STATUS_KEY: &str = "waiting_detect_encode";
const WAITING_STATUS_MESSAGE: &str =
    "Waiting for encoding detection. You may choose the reader syntax manually";

/// Document lifecycle callbacks a host delivers to a listener.
pub trait DocumentEvents {
    /// A document finished loading.
    fn on_open(&mut self, view: &mut dyn DocumentView);

    /// The document's content changed.
    fn on_modified(&mut self, view: &mut dyn DocumentView);

    /// The document is about to close.
    fn on_close(&mut self, view: &mut dyn DocumentView);

    /// The settle delay requested through `DocumentView::request_settle`
    /// has elapsed.
    fn on_settled(&mut self, view: &mut dyn DocumentView);
}

/// Switches large plain-text documents into reader mode and remembers where
/// the reader left off.
pub struct ReaderController<S: SettingsStore> {
    store: S,
    settings: ReaderSettings,
    probe: DetectorProbe,
    states: HashMap<DocumentId, ReaderState>,
    /// Restores waiting for the reader syntax to settle.
    pending_restores: HashMap<DocumentId, Viewport>,
}

impl<S: SettingsStore> ReaderController<S> {
    /// Load settings from `store` and look for the detector where they say.
    pub fn new(store: S) -> Self {
        let settings = store.load();
        let probe = DetectorProbe::new(settings.detector_path.clone());
        Self {
            store,
            settings,
            probe,
            states: HashMap::new(),
            pending_restores: HashMap::new(),
        }
    }

    pub fn with_probe(mut self, probe: DetectorProbe) -> Self {
        self.probe = probe;
        self
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self, id: DocumentId) -> ReaderState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    /// Write the current settings to the store.
    pub fn flush(&self) -> Result<()> {
        self.store.save(&self.settings)
    }

    /// Whether an open document qualifies for reader mode.
    pub fn is_eligible(&self, view: &dyn DocumentView) -> bool {
        if view.syntax() != self.settings.plain_text_syntax {
            return false;
        }
        if let Some(path) = view.file_path() {
            if !self.settings.accepts_extension(path) {
                return false;
            }
        }
        if view.size() < self.settings.min_file_size {
            return false;
        }
        match view.file_path() {
            Some(path) => !self.settings.not_use_reader.contains(path),
            None => true,
        }
    }

    /// Enter reader mode now, or start waiting for the encoding detector.
    pub fn try_enter_reader_mode(&mut self, view: &mut dyn DocumentView) {
        let id = view.id();
        if self.state(id).is_active() {
            return;
        }

        if should_wait_for_detector(&*view, &self.settings.fallback_encoding, &self.probe) {
            view.set_status(WAITING_STATUS_KEY, WAITING_STATUS_MESSAGE);
            self.states
                .insert(id, ReaderState::awaiting(self.settings.encoding_wait_ticks));
            log::debug!("{}: waiting for encoding detection", describe(view));
            return;
        }

        view.set_read_only(true);
        view.set_syntax(&self.settings.reader_syntax);
        self.states.insert(id, ReaderState::Active);
        log::info!("{}: reader mode on", describe(view));

        let Some(fingerprint) = fingerprint_view(&*view, MIN_FILE_SIZE) else {
            return;
        };
        if let Some(viewport) = self.settings.history.get(fingerprint.as_str()).copied() {
            self.pending_restores.insert(id, viewport);
            view.request_settle(self.settings.restore_delay());
        }
    }

    fn remember_opt_out(&mut self, view: &dyn DocumentView) {
        let Some(path) = view.file_path() else {
            return;
        };
        self.settings
            .not_use_reader
            .insert(path, self.settings.max_not_use_reader);
        log::info!("{}: will not be opened in reader mode again", describe(view));
        self.persist();
    }

    fn remember_position(&mut self, view: &dyn DocumentView) {
        let mut changed = false;
        if let Some(path) = view.file_path() {
            changed |= self.settings.not_use_reader.remove(path);
        }
        if let Some(fingerprint) = fingerprint_view(view, MIN_FILE_SIZE) {
            let viewport = view.visible_region();
            self.settings
                .history
                .insert(fingerprint.to_string(), viewport);
            log::debug!(
                "{}: remembered [{}, {}]",
                describe(view),
                viewport.begin,
                viewport.end
            );
            changed = true;
        }
        if changed {
            self.persist();
        }
    }

    fn persist(&self) {
        if let Err(e) = self.flush() {
            log::warn!("Failed to save reader settings: {}", e);
        }
    }
}

impl<S: SettingsStore> DocumentEvents for ReaderController<S> {
    fn on_open(&mut self, view: &mut dyn DocumentView) {
        if self.state(view.id()).is_active() || !self.is_eligible(view) {
            return;
        }
        self.try_enter_reader_mode(view);
    }

    fn on_modified(&mut self, view: &mut dyn DocumentView) {
        let id = view.id();
        let state = self.state(id);
        if !state.is_awaiting() {
            return;
        }

        if view.settings().is_set(ORIGIN_ENCODING_KEY) {
            view.erase_status(WAITING_STATUS_KEY);
            self.states.remove(&id);
            self.try_enter_reader_mode(view);
            return;
        }

        match state.tick() {
            ReaderState::Idle => {
                view.erase_status(WAITING_STATUS_KEY);
                self.states.remove(&id);
                log::debug!("{}: gave up waiting for encoding detection", describe(view));
            }
            next => {
                self.states.insert(id, next);
            }
        }
    }

    fn on_close(&mut self, view: &mut dyn DocumentView) {
        let id = view.id();
        self.states.remove(&id);
        self.pending_restores.remove(&id);

        let is_plain = view.syntax() == self.settings.plain_text_syntax;
        let is_reader = view.syntax() == self.settings.reader_syntax;
        if is_plain && view.size() >= self.settings.min_file_size {
            self.remember_opt_out(view);
            return;
        }
        if !is_reader {
            return;
        }
        self.remember_position(view);
    }

    fn on_settled(&mut self, view: &mut dyn DocumentView) {
        let Some(viewport) = self.pending_restores.remove(&view.id()) else {
            return;
        };
        if view.syntax() != self.settings.reader_syntax {
            return;
        }
        view.scroll_to(viewport.end, false);
        view.scroll_to(viewport.begin, true);
        view.set_caret(viewport.midpoint());
    }
}

fn describe(view: &dyn DocumentView) -> String {
    match view.file_path() {
        Some(path) => extract_filename(path),
        None => format!("untitled #{}", view.id().0),
    }
}
