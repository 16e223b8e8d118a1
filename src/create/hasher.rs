use std::fs::File;
use std::io::{self, Read};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::error::CreateError;
use crate::constants::READ_BUFFER_SIZE;
use crate::metainfo::PieceDigests;

/// Streaming SHA1 piece hasher over a sequence of files.
///
/// Bytes fed to the hasher form one virtual stream; a digest is emitted every
/// `piece_length` bytes regardless of where file boundaries fall, and
/// [`finish`](Self::finish) emits the trailing short piece.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU64;
/// use torrent_builder::PieceHasher;
///
/// let mut hasher = PieceHasher::new(NonZeroU64::new(32).unwrap());
/// hasher.update(&[0u8; 40]);
/// hasher.update(&[1u8; 10]);
///
/// let pieces = hasher.finish();
/// assert_eq!(pieces.len(), 2);
/// ```
#[derive(Debug)]
pub struct PieceHasher {
    piece_length: u64,
    sha1: Sha1,
    /// Bytes in the current, unfinished piece. Always `< piece_length`.
    filled: u64,
    total: u64,
    pieces: PieceDigests,
    buf: Vec<u8>,
}

impl PieceHasher {
    pub fn new(piece_length: NonZeroU64) -> Self {
        Self::with_buffer_size(piece_length, READ_BUFFER_SIZE)
    }

    /// Creates a hasher whose reads are at most `buffer_size` bytes.
    ///
    /// The buffer size only affects how files are read, never the digests.
    pub fn with_buffer_size(piece_length: NonZeroU64, buffer_size: usize) -> Self {
        let piece_length = piece_length.get();
        let buffer_size = usize::try_from(piece_length)
            .map_or(buffer_size, |len| len.min(buffer_size))
            .max(1);

        Self {
            piece_length,
            sha1: Sha1::new(),
            filled: 0,
            total: 0,
            pieces: PieceDigests::default(),
            buf: vec![0; buffer_size],
        }
    }

    /// Bytes hashed so far across all inputs.
    pub fn total_bytes(&self) -> u64 {
        self.total
    }

    /// Pieces completed so far, not counting the one in progress.
    pub fn completed_pieces(&self) -> usize {
        self.pieces.len()
    }

    /// Feeds bytes into the stream, cutting a piece each time one fills up.
    pub fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            let room = self.piece_length - self.filled;
            let take = usize::try_from(room).map_or(data.len(), |room| room.min(data.len()));
            let (head, rest) = data.split_at(take);

            self.sha1.update(head);
            self.filled += take as u64;
            self.total += take as u64;

            if self.filled == self.piece_length {
                self.finish_piece();
            }
            data = rest;
        }
    }

    /// Hashes everything `reader` yields until end of stream.
    ///
    /// No single read extends past the next piece boundary.
    /// Returns the number of bytes consumed.
    pub fn hash_reader<R: Read>(&mut self, reader: &mut R) -> io::Result<u64> {
        let mut buf = std::mem::take(&mut self.buf);
        let result = self.read_into(reader, &mut buf);
        self.buf = buf;
        result
    }

    fn read_into<R: Read>(&mut self, reader: &mut R, buf: &mut [u8]) -> io::Result<u64> {
        let mut consumed = 0u64;
        loop {
            let room = self.piece_length - self.filled;
            let want = usize::try_from(room).map_or(buf.len(), |room| room.min(buf.len()));

            match reader.read(&mut buf[..want]) {
                Ok(0) => return Ok(consumed),
                Ok(n) => {
                    self.update(&buf[..n]);
                    consumed += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Opens `path`, hashes its whole contents and closes it again.
    pub fn hash_file(&mut self, path: &Path) -> Result<u64, CreateError> {
        let mut file = File::open(path).map_err(|e| CreateError::io(path, e))?;
        let read = self
            .hash_reader(&mut file)
            .map_err(|e| CreateError::io(path, e))?;

        debug!(
            path = %path.display(),
            bytes = read,
            pieces = self.pieces.len(),
            "hashed file"
        );
        Ok(read)
    }

    fn finish_piece(&mut self) {
        self.pieces.push(self.sha1.finalize_reset().into());
        self.filled = 0;
        trace!(piece = self.pieces.len() - 1, "piece complete");
    }

    /// Flushes the final piece and returns all digests.
    ///
    /// The last piece is emitted if it holds any bytes, or if nothing was
    /// hashed at all (one digest of the empty stream). A stream that ends
    /// exactly on a piece boundary gets no extra digest.
    pub fn finish(mut self) -> PieceDigests {
        if self.filled > 0 || self.total == 0 {
            self.finish_piece();
        }
        self.pieces
    }
}

/// Hashes the files named on `paths`, in the order received, until the
/// sender is dropped.
///
/// Returns the digests together with the number of bytes hashed. Meant to run
/// on a blocking thread; the first failure stops hashing and drops the
/// receiver, which in turn stops the sender.
pub fn hash_channel(
    mut paths: mpsc::Receiver<PathBuf>,
    piece_length: NonZeroU64,
) -> Result<(PieceDigests, u64), CreateError> {
    let mut hasher = PieceHasher::new(piece_length);

    while let Some(path) = paths.blocking_recv() {
        hasher.hash_file(&path)?;
    }

    let total = hasher.total_bytes();
    Ok((hasher.finish(), total))
}
