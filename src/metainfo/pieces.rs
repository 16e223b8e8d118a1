use std::num::NonZeroU64;

use bytes::Bytes;

use super::error::MetainfoError;

/// Length of one SHA1 piece digest.
pub const DIGEST_LEN: usize = 20;

/// The ordered SHA1 digests of every piece, as stored in the `pieces` field.
///
/// Produced by [`PieceHasher::finish`](crate::create::PieceHasher::finish)
/// once the last byte has been hashed, or parsed back from an existing
/// torrent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceDigests(Vec<[u8; DIGEST_LEN]>);

impl PieceDigests {
    /// Number of digests a stream of `total_bytes` produces at `piece_length`.
    ///
    /// An empty stream still has one piece: the digest of no bytes.
    ///
    /// ```
    /// use std::num::NonZeroU64;
    /// use torrent_builder::metainfo::PieceDigests;
    ///
    /// let piece_length = NonZeroU64::new(32).unwrap();
    /// assert_eq!(PieceDigests::expected_count(0, piece_length), 1);
    /// assert_eq!(PieceDigests::expected_count(50, piece_length), 2);
    /// assert_eq!(PieceDigests::expected_count(64, piece_length), 2);
    /// ```
    pub fn expected_count(total_bytes: u64, piece_length: NonZeroU64) -> u64 {
        total_bytes.div_ceil(piece_length.get()).max(1)
    }

    pub(crate) fn push(&mut self, digest: [u8; DIGEST_LEN]) {
        self.0.push(digest);
    }

    /// Splits a concatenated `pieces` string into digests.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        if data.len() % DIGEST_LEN != 0 {
            return Err(MetainfoError::InvalidPiecesLength(data.len()));
        }

        Ok(Self(
            data.chunks_exact(DIGEST_LEN)
                .map(|chunk| {
                    let mut digest = [0u8; DIGEST_LEN];
                    digest.copy_from_slice(chunk);
                    digest
                })
                .collect(),
        ))
    }

    /// Concatenates the digests in piece order.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.0.concat())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[u8; DIGEST_LEN]> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8; DIGEST_LEN]> {
        self.0.iter()
    }
}
