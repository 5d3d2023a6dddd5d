//! Derived file names for annotations and cleaned outputs.

use std::path::{Path, PathBuf};

use crate::constants::{CLEANED_SUFFIX, DEPTH_SUFFIX, OUTPUT_EXTENSION, RGB_SUFFIX};

/// Remove the extension from a path.
///
/// Only a dot inside the final component counts:
/// `/foo/bar.dat` -> `/foo/bar`, `/foo.zim/bar` -> `/foo.zim/bar`.
pub fn remove_extension(path: &Path) -> PathBuf {
    path.with_extension("")
}

/// Append `suffix` and the output extension to the extension-less `path`.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = remove_extension(path).into_os_string();
    name.push(suffix);
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    PathBuf::from(name)
}

/// Where the user image of a playlist entry is persisted.
pub fn user_image_path(entry: &Path, suffix: &str) -> PathBuf {
    with_suffix(entry, suffix)
}

/// Where the cleanup pipeline writes the cleaned version of `path`.
pub fn cleaned_path(path: &Path) -> PathBuf {
    with_suffix(path, CLEANED_SUFFIX)
}

/// Entry base name for a depth-mode argument: drops `_depth.png` / `_rgb.png`.
pub fn depth_entry_base(arg: &str) -> String {
    arg.replace(DEPTH_SUFFIX, "").replace(RGB_SUFFIX, "")
}

/// Path of the depth image of a depth-mode entry.
pub fn depth_image_path(base: &Path) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(DEPTH_SUFFIX);
    PathBuf::from(name)
}

/// Path of the RGB image of a depth-mode entry.
pub fn rgb_image_path(base: &Path) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(RGB_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_extension() {
        assert_eq!(remove_extension(Path::new("/foo/bar")), PathBuf::from("/foo/bar"));
        assert_eq!(remove_extension(Path::new("/foo/bar.dat")), PathBuf::from("/foo/bar"));
        assert_eq!(remove_extension(Path::new("/foo.zim/bar.dat")), PathBuf::from("/foo.zim/bar"));
        assert_eq!(remove_extension(Path::new("/foo.zim/bar")), PathBuf::from("/foo.zim/bar"));
        assert_eq!(remove_extension(Path::new("img.tar.png")), PathBuf::from("img.tar"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_preserved() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let entry = Path::new(OsStr::from_bytes(b"scans/fr\xffme.png"));
        let expected = Path::new(OsStr::from_bytes(b"scans/fr\xffme_gt.png"));
        assert_eq!(user_image_path(entry, "_gt"), expected);
    }

    #[test]
    fn test_user_image_path() {
        assert_eq!(
            user_image_path(Path::new("data/frame01.png"), "_ground_truth_user"),
            PathBuf::from("data/frame01_ground_truth_user.png")
        );
        assert_eq!(
            user_image_path(Path::new("data/frame01"), "_gt"),
            PathBuf::from("data/frame01_gt.png")
        );
    }

    #[test]
    fn test_cleaned_path() {
        assert_eq!(
            cleaned_path(Path::new("a/b_ground_truth_user.png")),
            PathBuf::from("a/b_ground_truth_user_cleaned.png")
        );
    }

    #[test]
    fn test_depth_entry_base() {
        assert_eq!(depth_entry_base("scans/kitchen_depth.png"), "scans/kitchen");
        assert_eq!(depth_entry_base("scans/kitchen_rgb.png"), "scans/kitchen");
        assert_eq!(depth_entry_base("scans/kitchen"), "scans/kitchen");
        assert_eq!(
            depth_image_path(Path::new("scans/kitchen")),
            PathBuf::from("scans/kitchen_depth.png")
        );
        assert_eq!(
            rgb_image_path(Path::new("scans/kitchen")),
            PathBuf::from("scans/kitchen_rgb.png")
        );
    }
}
