//! Playlist of entries being annotated.

use std::path::PathBuf;

use crate::error::{AnnotatorError, Result};
use crate::paths::depth_entry_base;

/// How command-line arguments name playlist entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryNaming {
    /// Each argument is a boundary image path
    #[default]
    BoundaryFile,
    /// Each argument names a depth/RGB pair; `_depth.png` / `_rgb.png` are stripped
    DepthBase,
}

/// Ordered, non-empty sequence of entries with a cursor.
///
/// Built once at startup and never resized.
#[derive(Clone, Debug)]
pub struct Playlist {
    entries: Vec<PathBuf>,
    current_index: usize,
}

impl Playlist {
    /// Create a playlist positioned on the first entry.
    pub fn new(entries: Vec<PathBuf>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AnnotatorError::EmptyPlaylist);
        }
        log::info!("Playlist with {} entries", entries.len());
        Ok(Self {
            entries,
            current_index: 0,
        })
    }

    /// Create a playlist from command-line arguments.
    ///
    /// With [`EntryNaming::DepthBase`], `x_depth.png x_rgb.png` on the command
    /// line name the same entry `x`, so consecutive duplicates collapse.
    /// Boundary file arguments are kept as given.
    pub fn from_args<S: AsRef<str>>(args: &[S], naming: EntryNaming) -> Result<Self> {
        let mut entries: Vec<PathBuf> = args
            .iter()
            .map(|arg| match naming {
                EntryNaming::BoundaryFile => PathBuf::from(arg.as_ref()),
                EntryNaming::DepthBase => PathBuf::from(depth_entry_base(arg.as_ref())),
            })
            .collect();
        if naming == EntryNaming::DepthBase {
            entries.dedup();
        }
        Self::new(entries)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: construction rejects empty playlists.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in order.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Get the entry at `index`.
    pub fn get(&self, index: usize) -> Option<&PathBuf> {
        self.entries.get(index)
    }

    /// Index of the current entry.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The current entry.
    pub fn current(&self) -> &PathBuf {
        &self.entries[self.current_index]
    }

    /// Move the cursor. Returns false if `index` is out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.current_index = index;
        true
    }

    /// Index after the current one, wrapping around.
    pub fn next_index(&self) -> usize {
        (self.current_index + 1) % self.entries.len()
    }

    /// Index before the current one, wrapping around.
    pub fn prev_index(&self) -> usize {
        (self.current_index + self.entries.len() - 1) % self.entries.len()
    }

    /// Index of the last entry.
    pub fn last_index(&self) -> usize {
        self.entries.len() - 1
    }

    /// Get progress string like "3/15".
    pub fn progress(&self) -> String {
        format!("{}/{}", self.current_index + 1, self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(n: usize) -> Playlist {
        Playlist::new((0..n).map(|i| PathBuf::from(format!("img{i}.png"))).collect()).unwrap()
    }

    #[test]
    fn test_empty_playlist_is_rejected() {
        assert!(matches!(
            Playlist::new(Vec::new()),
            Err(AnnotatorError::EmptyPlaylist)
        ));
        let none: [&str; 0] = [];
        assert!(Playlist::from_args(&none, EntryNaming::BoundaryFile).is_err());
    }

    #[test]
    fn test_wraparound() {
        let mut list = playlist(3);
        assert_eq!(list.prev_index(), 2);
        assert!(list.set_current(2));
        assert_eq!(list.next_index(), 0);
        assert_eq!(list.progress(), "3/3");
    }

    #[test]
    fn test_single_entry_wraps_to_itself() {
        let list = playlist(1);
        assert_eq!(list.next_index(), 0);
        assert_eq!(list.prev_index(), 0);
    }

    #[test]
    fn test_set_current_out_of_range() {
        let mut list = playlist(2);
        assert!(!list.set_current(2));
        assert_eq!(list.current_index(), 0);
    }

    #[test]
    fn test_depth_arguments_collapse() {
        let args = ["a_depth.png", "a_rgb.png", "b_depth.png"];
        let list = Playlist::from_args(&args, EntryNaming::DepthBase).unwrap();
        assert_eq!(list.entries(), &[PathBuf::from("a"), PathBuf::from("b")]);

        let list = Playlist::from_args(&args, EntryNaming::BoundaryFile).unwrap();
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_repeated_boundary_files_are_kept() {
        let list = Playlist::from_args(&["a.png", "a.png", "b.png"], EntryNaming::BoundaryFile)
            .unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1), Some(&PathBuf::from("a.png")));
    }
}
