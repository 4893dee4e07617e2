//! Capability-based filesystem helpers for Roadie's CSV inputs and outputs.
//!
//! Every helper takes a UTF-8 path and opens the nearest ambient directory
//! through `cap-std`, so callers never touch `std::fs` directly.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Open an existing file for reading.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create or truncate `path` for writing, creating missing parent
/// directories first.
///
/// # Errors
///
/// Returns an error when `path` has no file name or when a directory or the
/// file cannot be created.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    dir.create(name.as_str())
}

/// Open the directory containing `path` and return it with the file name.
///
/// A bare file name resolves against the current directory.
///
/// # Errors
///
/// Returns an error when `path` has no file name or its parent cannot be
/// opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("`{path}` does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Whether `path` is a regular file.
///
/// # Errors
///
/// Returns [`io::ErrorKind::NotFound`] when `path` does not exist and
/// propagates any other failure to read its metadata.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Create every missing directory above `path`.
///
/// # Errors
///
/// Returns an error when the anchoring directory cannot be opened or a
/// directory cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (anchor, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    anchor.create_dir_all(&relative)
}

/// Resolve `file` against an optional data directory.
///
/// Absolute paths and paths without a directory are returned unchanged.
#[must_use]
pub fn resolve_in_dir(dir: Option<&Utf8Path>, file: &Utf8Path) -> Utf8PathBuf {
    match dir {
        Some(dir) if file.is_relative() => dir.join(file),
        _ => file.to_path_buf(),
    }
}

/// Split `path` into an opened anchor directory and the remainder relative
/// to it.
///
/// Absolute paths anchor at their root (or drive prefix on Windows);
/// relative paths anchor at the current directory.
///
/// # Errors
///
/// Returns an error when the anchor cannot be opened or a component is not
/// valid UTF-8.
pub fn base_dir_and_relative(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let (anchor, relative) = match std_path.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("drive prefix is not UTF-8"))?;
            let anchor = Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR_STR);
            let relative = path
                .strip_prefix(&anchor)
                .or_else(|_| path.strip_prefix(prefix))
                .map_err(|_| io::Error::other(format!("cannot strip `{prefix}` from `{path}`")))?;
            (anchor, relative.to_path_buf())
        }
        Some(Component::RootDir) => {
            let anchor = Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR);
            let relative = path
                .strip_prefix(&anchor)
                .map_err(|_| io::Error::other(format!("cannot strip root from `{path}`")))?;
            (anchor, relative.to_path_buf())
        }
        _ => (Utf8PathBuf::from("."), path.to_path_buf()),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((dir, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::io::{Read, Write};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> (TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        (dir, root)
    }

    #[rstest]
    fn creates_nested_file_and_reads_it_back(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let target = root.join("out/tables/cities.csv");
        let mut file = create_utf8_file(&target).expect("create");
        file.write_all(b"city,country\n").expect("write");
        drop(file);

        assert!(file_is_file(&target).expect("metadata"));
        let mut contents = String::new();
        open_utf8_file(&target)
            .expect("open")
            .read_to_string(&mut contents)
            .expect("read");
        assert_eq!(contents, "city,country\n");
    }

    #[rstest]
    fn missing_file_reports_not_found(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let err = file_is_file(&root.join("absent.csv")).expect_err("absent");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn directory_is_not_a_file(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        ensure_parent_dir(&root.join("nested/file.csv")).expect("mkdir");
        assert!(!file_is_file(&root.join("nested")).expect("metadata"));
    }

    #[rstest]
    fn path_without_file_name_is_rejected() {
        assert!(open_dir_and_file(Utf8Path::new("/")).is_err());
    }

    #[rstest]
    #[case(Some("data"), "costs.csv", "data/costs.csv")]
    #[case(None, "costs.csv", "costs.csv")]
    #[case(Some("data"), "/abs/costs.csv", "/abs/costs.csv")]
    fn resolves_relative_files_against_the_data_dir(
        #[case] dir: Option<&str>,
        #[case] file: &str,
        #[case] expected: &str,
    ) {
        let resolved = resolve_in_dir(dir.map(Utf8Path::new), Utf8Path::new(file));
        assert_eq!(resolved, Utf8PathBuf::from(expected));
    }

    #[cfg(unix)]
    #[rstest]
    fn absolute_paths_anchor_at_root(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let (_dir, relative) = base_dir_and_relative(&root).expect("split");
        assert!(relative.is_relative());
        assert_eq!(Utf8Path::new("/").join(&relative), root);
    }
}
