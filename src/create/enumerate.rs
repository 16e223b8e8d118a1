use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::CreateError;
use crate::constants::MAX_DIRECTORY_DEPTH;
use crate::metainfo::{FileEntry, TargetKind};

/// The files of a torrent target, in read order.
///
/// `files[i]` describes the file at `paths[i]`; the hasher must consume
/// `paths` in this order for the piece digests to match the file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    pub kind: TargetKind,
    pub files: Vec<FileEntry>,
    pub paths: Vec<PathBuf>,
}

impl Enumeration {
    pub fn total_length(&self) -> u64 {
        self.files.iter().map(|f| f.length).sum()
    }

    fn record(&mut self, segments: Vec<String>, length: u64, path: PathBuf) {
        self.files.push(FileEntry::new(segments, length));
        self.paths.push(path);
    }
}

/// Lists every file under `target` without streaming them anywhere.
pub fn enumerate(target: impl AsRef<Path>) -> Result<Enumeration, CreateError> {
    enumerate_with(target, |_| Ok(()))
}

/// Lists every file under `target`, calling `on_file` for each one as soon
/// as its entry is recorded.
///
/// A file target yields one entry named after the file. A directory is walked
/// depth-first with each directory's entries sorted by name, so the order is
/// stable across runs and platforms. Symlinks are followed. Entries below the
/// target that are neither files nor directories (sockets, FIFOs) are
/// skipped.
///
/// # Errors
///
/// - [`CreateError::NotFound`] if `target` does not exist
/// - [`CreateError::UnsupportedTarget`] if `target` itself is a socket, FIFO
///   or device
/// - [`CreateError::Io`] if any entry cannot be listed or inspected
/// - [`CreateError::SymlinkCycle`] if a symlink leads back to a directory
///   that is already being walked
/// - [`CreateError::InvalidPath`] for names that are not valid UTF-8
/// - any error returned by `on_file`, which stops the walk
pub fn enumerate_with<F>(
    target: impl AsRef<Path>,
    mut on_file: F,
) -> Result<Enumeration, CreateError>
where
    F: FnMut(&Path) -> Result<(), CreateError>,
{
    let target = target.as_ref();
    let metadata = fs::metadata(target).map_err(|e| CreateError::target(target, e))?;

    let mut out = Enumeration {
        kind: TargetKind::File,
        files: Vec::new(),
        paths: Vec::new(),
    };

    if metadata.is_dir() {
        out.kind = TargetKind::Directory;
        walk(target, &mut Vec::new(), &mut Vec::new(), &mut out, &mut on_file)?;
    } else if metadata.is_file() {
        out.record(vec![target_name(target)?], metadata.len(), target.to_path_buf());
        on_file(target)?;
    } else {
        return Err(CreateError::UnsupportedTarget(target.to_path_buf()));
    }

    debug!(
        target = %target.display(),
        files = out.files.len(),
        bytes = out.total_length(),
        "enumeration complete"
    );
    Ok(out)
}

fn walk<F>(
    dir: &Path,
    prefix: &mut Vec<String>,
    ancestors: &mut Vec<PathBuf>,
    out: &mut Enumeration,
    on_file: &mut F,
) -> Result<(), CreateError>
where
    F: FnMut(&Path) -> Result<(), CreateError>,
{
    if prefix.len() >= MAX_DIRECTORY_DEPTH {
        return Err(CreateError::DirectoryTooDeep {
            path: dir.to_path_buf(),
            max: MAX_DIRECTORY_DEPTH,
        });
    }

    // `ancestors` holds the canonical path of every directory above this one.
    let canonical = fs::canonicalize(dir).map_err(|e| CreateError::io(dir, e))?;
    if ancestors.contains(&canonical) {
        return Err(CreateError::SymlinkCycle(dir.to_path_buf()));
    }
    ancestors.push(canonical);

    let mut entries = fs::read_dir(dir)
        .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
        .map_err(|e| CreateError::io(dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry
            .file_name()
            .into_string()
            .map_err(|_| CreateError::InvalidPath(path.clone()))?;
        let metadata = fs::metadata(&path).map_err(|e| CreateError::io(&path, e))?;

        prefix.push(name);
        if metadata.is_dir() {
            walk(&path, prefix, ancestors, out, on_file)?;
        } else if metadata.is_file() {
            debug!(path = %path.display(), length = metadata.len(), "found file");
            out.record(prefix.clone(), metadata.len(), path.clone());
            on_file(&path)?;
        } else {
            warn!(path = %path.display(), "skipping special file");
        }
        prefix.pop();
    }

    ancestors.pop();
    Ok(())
}

/// The torrent name for `target`: its final path component.
///
/// Paths without one (`.`, `dir/..`) are canonicalized first.
pub fn target_name(target: &Path) -> Result<String, CreateError> {
    let name = match target.file_name() {
        Some(name) => name.to_os_string(),
        None => fs::canonicalize(target)
            .map_err(|e| CreateError::target(target, e))?
            .file_name()
            .ok_or_else(|| CreateError::InvalidPath(target.to_path_buf()))?
            .to_os_string(),
    };

    name.into_string()
        .map_err(|_| CreateError::InvalidPath(target.to_path_buf()))
}
