//! Photo source discovery for the binary: recursive directory scan with a
//! built-in fallback list when nothing is configured or found.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::Error;

/// Sources used when no library directory is configured or the scan comes
/// back empty. Opaque identifiers as far as the animation core is
/// concerned; the bundled acquire task treats them as file paths and falls
/// back to placeholder cards when they do not resolve.
pub const DEFAULT_SOURCES: &[&str] = &[
    "assets/cards/aurora.jpg",
    "assets/cards/breakwater.jpg",
    "assets/cards/cedar.jpg",
    "assets/cards/dune.jpg",
    "assets/cards/estuary.jpg",
    "assets/cards/foxglove.jpg",
    "assets/cards/glacier.jpg",
    "assets/cards/harbor.jpg",
];

pub fn default_sources() -> Vec<PathBuf> {
    DEFAULT_SOURCES.iter().map(PathBuf::from).collect()
}

/// Return `true` if `path` has an allowed image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    let exts: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| *e == ext)
        })
}

/// Discover photo sources for the carousel.
///
/// With no configured root, or a scan that finds nothing, the built-in
/// default list is returned so the carousel never starts empty by
/// accident.
///
/// # Errors
/// Returns [`Error::BadDir`] if `root` is set but missing or not a
/// directory.
pub fn discover(root: Option<&Path>) -> Result<Vec<PathBuf>, Error> {
    let Some(root) = root else {
        return Ok(default_sources());
    };
    if !root.exists() || !root.is_dir() {
        return Err(Error::BadDir(root.to_string_lossy().into_owned()));
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(root)
        .into_iter()
        // Skip hidden dot-directories *below* the root only.
        .filter_entry(|e| !should_skip_dir(e))
        .flatten()
    {
        let path = entry.path();
        if path.is_file() && is_supported_image(path) {
            out.push(path.to_path_buf());
        }
    }
    out.sort();

    if out.is_empty() {
        return Ok(default_sources());
    }
    Ok(out)
}

fn should_skip_dir(entry: &DirEntry) -> bool {
    // Never skip the root; tempfile roots can be dot-dirs.
    if entry.depth() == 0 {
        return false;
    }
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_accepts_common_formats() {
        assert!(is_supported_image(Path::new("a.JPG")));
        assert!(is_supported_image(Path::new("b.webp")));
        assert!(!is_supported_image(Path::new("c.txt")));
        assert!(!is_supported_image(Path::new("noext")));
    }

    #[test]
    fn no_root_yields_defaults() {
        let sources = discover(None).unwrap();
        assert_eq!(sources, default_sources());
    }

    #[test]
    fn empty_directory_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let sources = discover(Some(dir.path())).unwrap();
        assert_eq!(sources, default_sources());
    }

    #[test]
    fn scan_finds_images_and_skips_hidden_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("b.txt"), b"x").unwrap();
        let hidden = dir.path().join(".cache");
        std::fs::create_dir(&hidden).unwrap();
        std::fs::write(hidden.join("c.png"), b"x").unwrap();

        let sources = discover(Some(dir.path())).unwrap();
        assert_eq!(sources, vec![dir.path().join("a.jpg")]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = discover(Some(Path::new("/definitely/not/here"))).unwrap_err();
        assert!(matches!(err, Error::BadDir(_)));
    }
}
