//! Terminal host: turns [`GridAction`]s into session calls.
//!
//! The keyboard cursor stands in for a pointer. `Grab` starts a drag from the
//! cell under the cursor (or its item, in reorder mode) and a second `Grab`
//! drops it on whatever is under the cursor then.

use std::path::Path;

use crate::audio::{AudioBackend, AudioDispatcher};
use crate::core::{Catalog, DragOutcome, QuizObserver, QuizSession, QuizSnapshot};
use crate::input::GridCursor;
use crate::term::HostStatus;
use crate::types::{CellId, DragSource, DropTarget, GridAction, InteractionMode, ItemId};

/// Environment variable naming a JSON dataset.
pub const DATA_PATH_VAR: &str = "VOWEL_GRID_DATA";

/// Load the dataset at `path`, or the placeholder when there is none or it
/// cannot be used.
pub fn load_catalog(path: Option<&Path>, mode: InteractionMode) -> Catalog {
    let Some(path) = path else {
        return Catalog::placeholder(mode);
    };
    match std::fs::read_to_string(path) {
        Ok(text) => Catalog::from_json_or_placeholder(&text, mode),
        Err(err) => {
            log::warn!("cannot read dataset {}: {err}; using placeholder", path.display());
            Catalog::placeholder(mode)
        }
    }
}

/// Collects session callbacks for the status line.
#[derive(Debug, Default)]
pub struct HostObserver {
    pub placed: u32,
    pub completions: u32,
    pending: Option<String>,
}

impl HostObserver {
    fn take_notice(&mut self) -> Option<String> {
        self.pending.take()
    }
}

impl QuizObserver for HostObserver {
    fn on_correct_placement(&mut self, _item: ItemId) {
        self.placed += 1;
        self.pending = Some(format!("{} placed correctly", self.placed));
    }

    fn on_complete(&mut self) {
        self.completions += 1;
        self.pending = Some("Every vowel is in place!".to_string());
    }
}

pub struct QuizHost<B> {
    session: QuizSession<HostObserver>,
    cursor: GridCursor,
    audio: Option<AudioDispatcher<B>>,
    notice: Option<String>,
}

impl<B: AudioBackend> QuizHost<B> {
    pub fn new(session: QuizSession<HostObserver>, audio: Option<AudioDispatcher<B>>) -> Self {
        let grid = session.state().grid();
        let cursor = GridCursor::new(grid.width(), grid.height());
        Self {
            session,
            cursor,
            audio,
            notice: None,
        }
    }

    pub fn session(&self) -> &QuizSession<HostObserver> {
        &self.session
    }

    pub fn cursor(&self) -> &GridCursor {
        &self.cursor
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn snapshot_into(&self, out: &mut QuizSnapshot) {
        self.session.snapshot_into(out);
    }

    pub fn status(&self) -> HostStatus<'_> {
        HostStatus {
            cursor: self.cursor.position(),
            mode: self.session.mode(),
            round: self.session.rounds(),
            origin: self.session.catalog().origin(),
            notice: self.notice(),
        }
    }

    /// Apply one action.
    pub fn handle(&mut self, action: GridAction) {
        match action {
            GridAction::CursorUp
            | GridAction::CursorDown
            | GridAction::CursorLeft
            | GridAction::CursorRight => {
                self.cursor.apply(action);
            }
            GridAction::Grab => self.grab(),
            GridAction::Cancel => {
                if self.session.cancel_drag() {
                    self.notice = None;
                }
            }
            GridAction::PlayCue => {
                if let Some(item) = self.item_under_cursor() {
                    self.cue(item);
                }
            }
            GridAction::Submit => {
                self.session.submit();
                self.notice = None;
            }
            GridAction::Reset => {
                self.session.reset();
                self.notice = Some(format!("Round {}", self.session.rounds()));
            }
        }
    }

    fn grab(&mut self) {
        if self.session.is_dragging() {
            self.drop_here();
            return;
        }
        let source = match self.session.mode() {
            InteractionMode::Swap { .. } => self.cell_under_cursor().map(DragSource::Cell),
            InteractionMode::Reorder => self.item_under_cursor().map(DragSource::Item),
        };
        let Some(source) = source else {
            return;
        };
        match self.session.begin_drag(source) {
            Ok(()) => {
                self.notice = None;
                if let Some(item) = self.item_under_cursor() {
                    self.cue(item);
                }
            }
            Err(reason) => self.notice = Some(reason.message().to_string()),
        }
    }

    fn drop_here(&mut self) {
        let target = match self.session.mode() {
            InteractionMode::Swap { .. } => self.cell_under_cursor().map(DropTarget::Cell),
            InteractionMode::Reorder => Some(DropTarget::Index(self.cursor.index())),
        };
        match self.session.end_drag(target) {
            Ok(DragOutcome::Moved(_)) => {
                self.notice = self.session.observer_mut().take_notice();
            }
            Ok(DragOutcome::Cancelled) => self.notice = None,
            Err(reason) => self.notice = Some(reason.message().to_string()),
        }
    }

    fn cell_under_cursor(&self) -> Option<CellId> {
        self.session
            .state()
            .grid()
            .cell_at(self.cursor.position())
            .map(|cell| cell.id())
    }

    fn item_under_cursor(&self) -> Option<ItemId> {
        self.session
            .state()
            .grid()
            .cell_at(self.cursor.position())
            .and_then(|cell| cell.occupants().first().copied())
    }

    fn cue(&self, item: ItemId) {
        let (Some(audio), Some(item)) = (&self.audio, self.session.catalog().item(item)) else {
            return;
        };
        // Playback runs detached; its outcome is only logged.
        drop(audio.cue(item));
    }
}
