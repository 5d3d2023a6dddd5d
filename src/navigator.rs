//! Playlist navigation with save-before-switch.

use crate::playlist::Playlist;
use crate::session::AnnotationSession;

/// Moves an [`AnnotationSession`] through a [`Playlist`].
///
/// Every switch saves the entry being left (unless asked not to) and then
/// replaces the session rasters with those of the new entry.
pub struct Navigator {
    playlist: Playlist,
    session: AnnotationSession,
}

impl Navigator {
    /// Load the first entry into `session` without saving anything.
    pub fn start(playlist: Playlist, session: AnnotationSession) -> Self {
        let mut navigator = Self { playlist, session };
        navigator.goto_index(0, false);
        navigator
    }

    /// The playlist.
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// The active session.
    pub fn session(&self) -> &AnnotationSession {
        &self.session
    }

    /// The active session, mutably.
    pub fn session_mut(&mut self) -> &mut AnnotationSession {
        &mut self.session
    }

    /// Switch to entry `index`.
    ///
    /// Returns false without side effects if `index` is out of range. A failed
    /// save or load is logged and does not prevent the switch.
    pub fn goto_index(&mut self, index: usize, save_before: bool) -> bool {
        if index >= self.playlist.len() {
            log::warn!(
                "Playlist index {} out of range (len {})",
                index,
                self.playlist.len()
            );
            return false;
        }
        if save_before && !self.session.save() {
            log::warn!(
                "Leaving {:?} with unsaved changes",
                self.playlist.current()
            );
        }
        self.playlist.set_current(index);
        log::info!(
            "Entry {} {:?}",
            self.playlist.progress(),
            self.playlist.current()
        );
        let entry = self.playlist.current().clone();
        self.session.load_entry(&entry);
        true
    }

    /// Go to the next entry, wrapping around.
    pub fn next(&mut self) -> bool {
        self.goto_index(self.playlist.next_index(), true)
    }

    /// Go to the previous entry, wrapping around.
    pub fn prev(&mut self) -> bool {
        self.goto_index(self.playlist.prev_index(), true)
    }

    /// Go to the first entry.
    pub fn first(&mut self) -> bool {
        self.goto_index(0, true)
    }

    /// Go to the last entry.
    pub fn last(&mut self) -> bool {
        self.goto_index(self.playlist.last_index(), true)
    }
}
