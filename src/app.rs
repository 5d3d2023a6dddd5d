//! Annotator event loop.
//!
//! [`Annotator`] owns the navigator (and through it the session) and feeds
//! every [`Action`] to it, one at a time. Quitting always passes through
//! [`RunState::Terminating`], where the current entry gets a last
//! best-effort save.

use std::io::BufRead;

use crate::command::parse_command;
use crate::input::PointerEvent;
use crate::keybindings::{Key, KeyBindings};
use crate::message::Action;
use crate::navigator::Navigator;
use crate::preview::render_preview;
use crate::session::AnnotationSession;

/// Lifecycle of an annotator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Accepting actions
    #[default]
    Running,
    /// Quit requested; the final save is in progress
    Terminating,
    /// Done; further actions are ignored
    Terminated,
}

/// Interactive annotator over a playlist.
pub struct Annotator {
    navigator: Navigator,
    keybindings: KeyBindings,
    state: RunState,
}

impl Annotator {
    /// Create an annotator in the running state.
    pub fn new(navigator: Navigator, keybindings: KeyBindings) -> Self {
        Self {
            navigator,
            keybindings,
            state: RunState::Running,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Whether the annotator has finished.
    pub fn is_terminated(&self) -> bool {
        self.state == RunState::Terminated
    }

    /// The navigator.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// The active session.
    pub fn session(&self) -> &AnnotationSession {
        self.navigator.session()
    }

    /// Keybindings in use.
    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    // ============================================================================
    // Dispatch
    // ============================================================================

    /// Run one action to completion.
    ///
    /// Returns whether the action took effect. Actions after termination are
    /// ignored and return false.
    pub fn handle(&mut self, action: Action) -> bool {
        if self.state != RunState::Running {
            log::debug!("Ignoring {:?} in state {:?}", action, self.state);
            return false;
        }
        log::trace!("Handling {:?}", action);

        let session = self.navigator.session_mut();
        match action {
            Action::Fill(point) => session.fill(point),
            Action::Erase(point) => session.erase(point),
            Action::PaintBoundary(point) => session.paint_boundary(point),
            Action::SelectColor(index) => session.select(index),
            Action::Clear => session.clear(),
            Action::SetEdgeThresholds { low, high } => session.set_edge_thresholds(low, high),
            Action::Save => session.save(),
            Action::ExportPreview(path) => match render_preview(session).save(&path) {
                Ok(()) => {
                    log::info!("Wrote preview {:?}", path);
                    true
                }
                Err(e) => {
                    log::warn!("Could not write preview {:?}: {}", path, e);
                    false
                }
            },
            Action::Next => self.navigator.next(),
            Action::Prev => self.navigator.prev(),
            Action::First => self.navigator.first(),
            Action::Last => self.navigator.last(),
            Action::Goto(index) => self.navigator.goto_index(index, true),
            Action::Quit => {
                self.terminate();
                true
            }
        }
    }

    /// Handle a key press through the keybindings.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match self.keybindings.action_for_key(key) {
            Some(action) => self.handle(action),
            None => {
                log::debug!("No binding for key {:?}", key);
                false
            }
        }
    }

    /// Handle a pointer press or drag.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event.to_action() {
            Some(action) => self.handle(action),
            None => false,
        }
    }

    /// Handle one line of the text front-end.
    ///
    /// Malformed lines are logged and skipped.
    pub fn handle_line(&mut self, line: &str) -> bool {
        match parse_command(line, &self.keybindings) {
            Ok(Some(action)) => self.handle(action),
            Ok(None) => false,
            Err(e) => {
                log::warn!("Skipping command {:?}: {}", line.trim(), e);
                false
            }
        }
    }

    /// Feed lines from `input` until quit or end of input.
    ///
    /// End of input and read errors are treated as a quit, so this always
    /// returns in the terminated state.
    pub fn run<R: BufRead>(&mut self, input: R) {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    self.handle_line(&line);
                }
                Err(e) => {
                    log::warn!("Could not read command: {}", e);
                    break;
                }
            }
            if self.is_terminated() {
                return;
            }
        }
        log::debug!("End of input");
        self.handle(Action::Quit);
    }

    fn terminate(&mut self) {
        self.state = RunState::Terminating;
        log::info!("Quitting; saving {:?}", self.session().entry());
        if !self.navigator.session().save() {
            log::warn!("Final save failed, annotation of the current entry is lost");
        }
        self.state = RunState::Terminated;
    }
}
