use thiserror::Error;

use crate::bencode::BencodeError;

/// Errors that can occur when encoding or parsing a metainfo record.
#[derive(Debug, Error)]
pub enum MetainfoError {
    /// The record could not be converted to or from bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// A required field is missing from the torrent file.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field has an invalid value or type.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// The `pieces` string is not a whole number of SHA1 digests.
    #[error("pieces length {0} is not a multiple of 20")]
    InvalidPiecesLength(usize),
}
