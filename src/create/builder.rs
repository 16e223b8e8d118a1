//! Builder that turns a file or directory into a [`MetainfoRecord`].

use std::fs;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::enumerate::{enumerate_with, target_name, Enumeration};
use super::error::CreateError;
use super::hasher::hash_channel;
use crate::constants::{
    DEFAULT_ANNOUNCE, DEFAULT_CREATED_BY, DEFAULT_PIECE_LENGTH, PATH_CHANNEL_CAPACITY,
    TORRENT_EXTENSION,
};
use crate::metainfo::{MetainfoRecord, PieceDigests, StaticFields};

/// Builder for creating torrent files.
///
/// Holds the fields that do not depend on the target; [`build`](Self::build)
/// can be called for any number of targets.
#[derive(Debug, Clone)]
pub struct TorrentBuilder {
    /// Tracker URL.
    announce: String,
    /// Creator string.
    created_by: String,
    /// Piece length in bytes.
    piece_length: u64,
    /// Creation timestamp (defaults to now).
    creation_date: Option<i64>,
}

impl Default for TorrentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TorrentBuilder {
    pub fn new() -> Self {
        Self {
            announce: DEFAULT_ANNOUNCE.to_string(),
            created_by: DEFAULT_CREATED_BY.to_string(),
            piece_length: DEFAULT_PIECE_LENGTH,
            creation_date: None,
        }
    }

    /// Sets the tracker URL.
    pub fn announce(mut self, url: impl Into<String>) -> Self {
        self.announce = url.into();
        self
    }

    /// Sets the creator string.
    pub fn created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    /// Sets the piece length in bytes. Zero is rejected by [`build`](Self::build).
    pub fn piece_length(mut self, length: u64) -> Self {
        self.piece_length = length;
        self
    }

    /// Sets the creation date (Unix timestamp).
    pub fn creation_date(mut self, timestamp: i64) -> Self {
        self.creation_date = Some(timestamp);
        self
    }

    /// Hashes `target` and assembles its metainfo record.
    ///
    /// Enumeration and hashing run concurrently on blocking threads; the
    /// record is assembled only after the hasher has flushed its last piece.
    ///
    /// # Errors
    ///
    /// Any [`CreateError`]; all of them abort the whole build.
    pub async fn build(&self, target: impl AsRef<Path>) -> Result<MetainfoRecord, CreateError> {
        let target = target.as_ref().to_path_buf();
        let piece_length =
            NonZeroU64::new(self.piece_length).ok_or(CreateError::InvalidPieceLength)?;

        let metadata = fs::metadata(&target).map_err(|e| CreateError::target(&target, e))?;
        if !metadata.is_file() && !metadata.is_dir() {
            return Err(CreateError::UnsupportedTarget(target));
        }
        let name = target_name(&target)?;

        info!(
            target = %target.display(),
            piece_length = self.piece_length,
            "hashing torrent contents"
        );

        let (tx, rx) = mpsc::channel::<PathBuf>(PATH_CHANNEL_CAPACITY);

        let hashing = tokio::task::spawn_blocking(move || hash_channel(rx, piece_length));

        let walk_target = target.clone();
        let walking = tokio::task::spawn_blocking(move || {
            enumerate_with(&walk_target, |path| {
                tx.blocking_send(path.to_path_buf())
                    .map_err(|_| CreateError::HasherStopped)
            })
        });

        let (walked, hashed) = tokio::join!(walking, hashing);
        let (enumeration, pieces) = settle(walked?, hashed?)?;
        let expected = enumeration.total_length();

        let creation_date = self.creation_date.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0)
        });

        info!(
            name = %name,
            files = enumeration.files.len(),
            bytes = expected,
            pieces = pieces.len(),
            "hashing complete"
        );

        Ok(MetainfoRecord::assemble(
            name,
            enumeration.kind,
            enumeration.files,
            pieces,
            StaticFields {
                announce: self.announce.clone(),
                created_by: self.created_by.clone(),
                creation_date,
                piece_length: self.piece_length,
            },
        ))
    }
}

/// Combines the results of the walking and hashing tasks.
///
/// A hasher failure also makes the walker fail with
/// [`CreateError::HasherStopped`], so the hasher's error is checked first.
fn settle(
    walked: Result<Enumeration, CreateError>,
    hashed: Result<(PieceDigests, u64), CreateError>,
) -> Result<(Enumeration, PieceDigests), CreateError> {
    let (pieces, hashed_bytes) = hashed?;
    let enumeration = walked?;

    let expected = enumeration.total_length();
    if hashed_bytes != expected {
        return Err(CreateError::SizeMismatch {
            expected,
            actual: hashed_bytes,
        });
    }
    Ok((enumeration, pieces))
}

/// Encodes `record` and writes it to `<dir>/<name>.torrent`.
///
/// The bytes go to a `.part` file first and are renamed into place, so the
/// final name never refers to a partial torrent.
pub fn write_torrent(
    record: &MetainfoRecord,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, CreateError> {
    let bytes = record.encode()?;

    let path = dir
        .as_ref()
        .join(format!("{}.{}", record.info.name, TORRENT_EXTENSION));
    let partial = path.with_extension(format!("{TORRENT_EXTENSION}.part"));

    fs::write(&partial, &bytes).map_err(|e| CreateError::io(&partial, e))?;
    if let Err(e) = fs::rename(&partial, &path) {
        let _ = fs::remove_file(&partial);
        return Err(CreateError::io(&path, e));
    }

    debug!(path = %path.display(), bytes = bytes.len(), "torrent written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metainfo::{FileEntry, TargetKind};

    fn one_file(length: u64) -> Enumeration {
        Enumeration {
            kind: TargetKind::File,
            files: vec![FileEntry::new(vec!["a.bin".to_string()], length)],
            paths: vec![PathBuf::from("a.bin")],
        }
    }

    #[test]
    fn test_builder_defaults() {
        let builder = TorrentBuilder::new();
        assert_eq!(builder.announce, DEFAULT_ANNOUNCE);
        assert_eq!(builder.created_by, DEFAULT_CREATED_BY);
        assert_eq!(builder.piece_length, 33_554_432);
        assert_eq!(builder.creation_date, None);
    }

    #[test]
    fn test_builder_setters() {
        let builder = TorrentBuilder::new()
            .announce("http://tracker.example.com/announce")
            .created_by("tests")
            .piece_length(16384)
            .creation_date(1_700_000_000);

        assert_eq!(builder.announce, "http://tracker.example.com/announce");
        assert_eq!(builder.created_by, "tests");
        assert_eq!(builder.piece_length, 16384);
        assert_eq!(builder.creation_date, Some(1_700_000_000));
    }

    #[tokio::test]
    async fn test_zero_piece_length_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = TorrentBuilder::new().piece_length(0).build(dir.path()).await;
        assert!(matches!(result, Err(CreateError::InvalidPieceLength)));
    }

    #[tokio::test]
    async fn test_missing_target_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let result = TorrentBuilder::new().build(&missing).await;
        assert!(matches!(result, Err(CreateError::NotFound(p)) if p == missing));
    }

    #[test]
    fn test_settle_prefers_hasher_error() {
        let walked = Err(CreateError::HasherStopped);
        let hashed = Err(CreateError::io(
            Path::new("a.bin"),
            std::io::Error::other("disk gone"),
        ));

        let result = settle(walked, hashed);
        assert!(matches!(result, Err(CreateError::Io { path, .. }) if path == Path::new("a.bin")));
    }

    #[test]
    fn test_settle_reports_walker_error() {
        let walked = Err(CreateError::InvalidPath(PathBuf::from("bad")));
        let hashed = Ok((PieceDigests::default(), 0));

        assert!(matches!(
            settle(walked, hashed),
            Err(CreateError::InvalidPath(p)) if p == Path::new("bad")
        ));
    }

    #[test]
    fn test_settle_size_mismatch() {
        let result = settle(Ok(one_file(10)), Ok((PieceDigests::default(), 7)));
        assert!(matches!(
            result,
            Err(CreateError::SizeMismatch {
                expected: 10,
                actual: 7
            })
        ));
    }

    #[test]
    fn test_settle_matching_sizes() {
        let (enumeration, pieces) =
            settle(Ok(one_file(10)), Ok((PieceDigests::default(), 10))).unwrap();
        assert_eq!(enumeration, one_file(10));
        assert!(pieces.is_empty());
    }

    #[tokio::test]
    async fn test_failed_hasher_stops_walker() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..4 {
            fs::write(dir.path().join(format!("f{i}")), b"data").unwrap();
        }
        let missing = dir.path().join("gone");

        // Every send names a file that does not exist, so the hasher fails
        // on the first one and drops its receiver.
        let (tx, rx) = mpsc::channel::<PathBuf>(1);
        let hashing = tokio::task::spawn_blocking(move || {
            hash_channel(rx, NonZeroU64::new(4).unwrap())
        });
        let root = dir.path().to_path_buf();
        let sent = missing.clone();
        let walking = tokio::task::spawn_blocking(move || {
            enumerate_with(&root, |_| {
                tx.blocking_send(sent.clone())
                    .map_err(|_| CreateError::HasherStopped)
            })
        });

        let (walked, hashed) = tokio::join!(walking, hashing);
        let (walked, hashed) = (walked.unwrap(), hashed.unwrap());
        assert!(matches!(walked, Err(CreateError::HasherStopped)));

        let result = settle(walked, hashed);
        assert!(matches!(result, Err(CreateError::Io { path, .. }) if path == missing));
    }
}
