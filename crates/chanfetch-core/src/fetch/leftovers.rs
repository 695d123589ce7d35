//! Locating a fetch's output file and clearing partial files after failure.
//!
//! Titles are lossy once normalized, so two videos of one channel can share
//! a base name. Cleanup therefore only removes `<base>.*` files that were
//! not present before the fetch started.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn split_base(dest_base: &Path) -> Option<(&Path, String)> {
    let dir = dest_base.parent()?;
    let base = dest_base.file_name()?.to_string_lossy().into_owned();
    Some((dir, base))
}

/// Regular files named `<base>.*` next to `dest_base`.
fn base_entries(dest_base: &Path) -> io::Result<Vec<(OsString, PathBuf)>> {
    let Some((dir, base)) = split_base(dest_base) else {
        return Ok(Vec::new());
    };
    let prefix = format!("{base}.");
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let path = entry.path();
        if name.to_string_lossy().starts_with(&prefix) && path.is_file() {
            out.push((name, path));
        }
    }
    Ok(out)
}

/// Names of the `<base>.*` files present right now. Taken before a fetch so
/// that [`remove_leftovers`] can spare them.
pub fn existing_outputs(dest_base: &Path) -> HashSet<OsString> {
    match base_entries(dest_base) {
        Ok(entries) => entries.into_iter().map(|(name, _)| name).collect(),
        Err(e) => {
            tracing::warn!(base = %dest_base.display(), "could not list existing files: {}", e);
            HashSet::new()
        }
    }
}

/// The finished file for `dest_base`: a regular file in the same directory
/// whose name is the base name plus exactly one extension.
pub fn find_output(dest_base: &Path) -> Option<PathBuf> {
    let (_, base) = split_base(dest_base)?;
    let mut matches: Vec<PathBuf> = base_entries(dest_base)
        .ok()?
        .into_iter()
        .map(|(_, path)| path)
        .filter(|p| p.extension().is_some())
        .filter(|p| p.file_stem().map(|s| s.to_string_lossy() == base.as_str()).unwrap_or(false))
        .collect();
    matches.sort();
    matches.into_iter().next()
}

/// Removes `<base>.*` files next to `dest_base` (e.g. `.part`, `.ytdl`, an
/// unconverted `.webm`) except those named in `keep`. Returns how many were
/// removed.
pub fn remove_leftovers(dest_base: &Path, keep: &HashSet<OsString>) -> io::Result<usize> {
    let mut removed = 0;
    for (name, path) in base_entries(dest_base)? {
        if keep.contains(&name) {
            continue;
        }
        fs::remove_file(&path)?;
        removed += 1;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_output_matches_stem_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("song.webm.part"), b"x").unwrap();
        fs::write(dir.path().join("song_two.mp3"), b"x").unwrap();
        assert_eq!(find_output(&dir.path().join("song")), None);

        fs::write(dir.path().join("song.mp3"), b"x").unwrap();
        assert_eq!(find_output(&dir.path().join("song")), Some(dir.path().join("song.mp3")));
    }

    #[test]
    fn find_output_ignores_bare_base_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("song"), b"x").unwrap();
        assert_eq!(find_output(&dir.path().join("song")), None);
    }

    #[test]
    fn remove_leftovers_only_touches_this_base() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["song.webm.part", "song.webm.ytdl", "song.webm", "song_two.mp3", "songs.mp3"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let removed = remove_leftovers(&dir.path().join("song"), &HashSet::new()).unwrap();
        assert_eq!(removed, 3);
        assert!(dir.path().join("song_two.mp3").exists());
        assert!(dir.path().join("songs.mp3").exists());
        assert!(!dir.path().join("song.webm").exists());
    }

    #[test]
    fn remove_leftovers_spares_files_present_before_the_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("ep_1");
        fs::write(dir.path().join("ep_1.mp3"), b"earlier download").unwrap();
        let before = existing_outputs(&base);
        assert_eq!(before.len(), 1);

        fs::write(dir.path().join("ep_1.webm.part"), b"x").unwrap();
        assert_eq!(remove_leftovers(&base, &before).unwrap(), 1);
        assert!(dir.path().join("ep_1.mp3").exists());
        assert!(!dir.path().join("ep_1.webm.part").exists());
    }

    #[test]
    fn remove_leftovers_in_missing_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("nope").join("song");
        assert!(existing_outputs(&base).is_empty());
        assert_eq!(remove_leftovers(&base, &HashSet::new()).unwrap(), 0);
    }
}
