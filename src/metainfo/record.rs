use std::collections::BTreeMap;

use bytes::Bytes;

use super::error::MetainfoError;
use super::info_hash::InfoHash;
use super::pieces::PieceDigests;
use crate::bencode::{decode, encode, Value};
use crate::constants::{DEFAULT_ANNOUNCE, DEFAULT_CREATED_BY, DEFAULT_PIECE_LENGTH};

const KEY_ANNOUNCE: &[u8] = b"announce";
const KEY_CREATED_BY: &[u8] = b"createdby";
const KEY_CREATION_DATE: &[u8] = b"creationdate";
const KEY_INFO: &[u8] = b"info";
const KEY_NAME: &[u8] = b"name";
const KEY_PIECE_LENGTH: &[u8] = b"piece length";
const KEY_PIECES: &[u8] = b"pieces";
const KEY_LENGTH: &[u8] = b"length";
const KEY_FILES: &[u8] = b"files";
const KEY_PATH: &[u8] = b"path";

/// A file within the torrent.
///
/// `path` is relative to the torrent root and split into segments; no segment
/// contains a path separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: Vec<String>,
    pub length: u64,
}

impl FileEntry {
    pub fn new(path: Vec<String>, length: u64) -> Self {
        Self { path, length }
    }
}

/// Whether the torrent target was a single file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    File,
    Directory,
}

/// Fields that do not depend on the target's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFields {
    pub announce: String,
    pub created_by: String,
    /// Unix timestamp, seconds.
    pub creation_date: i64,
    pub piece_length: u64,
}

impl Default for StaticFields {
    fn default() -> Self {
        Self {
            announce: DEFAULT_ANNOUNCE.to_string(),
            created_by: DEFAULT_CREATED_BY.to_string(),
            creation_date: 0,
            piece_length: DEFAULT_PIECE_LENGTH,
        }
    }
}

/// Layout-specific part of the info dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoKind {
    /// `length` of the one file, which is named by [`Info::name`].
    SingleFile { length: u64 },
    /// `files` in enumeration order; paths are relative to [`Info::name`].
    MultiFile { files: Vec<FileEntry> },
}

/// The info dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub name: String,
    pub piece_length: u64,
    pub pieces: PieceDigests,
    pub kind: InfoKind,
}

impl Info {
    /// Sum of all file lengths.
    pub fn total_length(&self) -> u64 {
        match &self.kind {
            InfoKind::SingleFile { length } => *length,
            InfoKind::MultiFile { files } => files.iter().map(|f| f.length).sum(),
        }
    }

    /// Re-derives the file list from the info dictionary.
    ///
    /// A single-file torrent yields one entry whose path is the torrent name.
    pub fn files(&self) -> Vec<FileEntry> {
        match &self.kind {
            InfoKind::SingleFile { length } => {
                vec![FileEntry::new(vec![self.name.clone()], *length)]
            }
            InfoKind::MultiFile { files } => files.clone(),
        }
    }

    fn to_value(&self) -> Result<Value, MetainfoError> {
        let mut info = BTreeMap::new();

        info.insert(Bytes::from_static(KEY_NAME), Value::string(&self.name));
        info.insert(
            Bytes::from_static(KEY_PIECE_LENGTH),
            Value::Integer(to_integer(self.piece_length, "piece length")?),
        );
        info.insert(
            Bytes::from_static(KEY_PIECES),
            Value::Bytes(self.pieces.to_bytes()),
        );

        match &self.kind {
            InfoKind::SingleFile { length } => {
                info.insert(
                    Bytes::from_static(KEY_LENGTH),
                    Value::Integer(to_integer(*length, "length")?),
                );
            }
            InfoKind::MultiFile { files } => {
                let list = files
                    .iter()
                    .map(file_to_value)
                    .collect::<Result<Vec<_>, _>>()?;
                info.insert(Bytes::from_static(KEY_FILES), Value::List(list));
            }
        }

        Ok(Value::Dict(info))
    }

    fn parse(value: &Value) -> Result<Self, MetainfoError> {
        let dict = value.as_dict().ok_or(MetainfoError::InvalidField("info"))?;

        let name = dict
            .get(KEY_NAME)
            .and_then(|v| v.as_str())
            .ok_or(MetainfoError::MissingField("name"))?
            .to_string();

        let piece_length = dict
            .get(KEY_PIECE_LENGTH)
            .and_then(|v| v.as_integer())
            .ok_or(MetainfoError::MissingField("piece length"))?;
        let piece_length = u64::try_from(piece_length)
            .ok()
            .filter(|&len| len > 0)
            .ok_or(MetainfoError::InvalidField("piece length"))?;

        let pieces = dict
            .get(KEY_PIECES)
            .and_then(|v| v.as_bytes())
            .ok_or(MetainfoError::MissingField("pieces"))?;
        let pieces = PieceDigests::from_bytes(pieces)?;

        let kind = if let Some(length) = dict.get(KEY_LENGTH) {
            InfoKind::SingleFile {
                length: parse_length(length)?,
            }
        } else if let Some(files) = dict.get(KEY_FILES) {
            let files = files
                .as_list()
                .ok_or(MetainfoError::InvalidField("files"))?
                .iter()
                .map(parse_file)
                .collect::<Result<Vec<_>, _>>()?;
            InfoKind::MultiFile { files }
        } else {
            return Err(MetainfoError::MissingField("length or files"));
        };

        Ok(Self {
            name,
            piece_length,
            pieces,
            kind,
        })
    }
}

/// A complete metainfo record, ready to be bencoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetainfoRecord {
    pub announce: String,
    pub created_by: String,
    pub creation_date: i64,
    pub info: Info,
}

impl MetainfoRecord {
    /// Combines the enumerated files and the finished piece digests.
    ///
    /// A file target with exactly one entry becomes a single-file torrent
    /// carrying that entry's length; anything else becomes a multi-file
    /// torrent listing every entry in order.
    pub fn assemble(
        name: String,
        target: TargetKind,
        mut files: Vec<FileEntry>,
        pieces: PieceDigests,
        fields: StaticFields,
    ) -> Self {
        let kind = match (target, files.len()) {
            (TargetKind::File, 1) => InfoKind::SingleFile {
                length: files.remove(0).length,
            },
            _ => InfoKind::MultiFile { files },
        };

        Self {
            announce: fields.announce,
            created_by: fields.created_by,
            creation_date: fields.creation_date,
            info: Info {
                name,
                piece_length: fields.piece_length,
                pieces,
                kind,
            },
        }
    }

    pub fn is_single_file(&self) -> bool {
        matches!(self.info.kind, InfoKind::SingleFile { .. })
    }

    /// Converts the record to its bencode dictionary.
    pub fn to_value(&self) -> Result<Value, MetainfoError> {
        let mut root = BTreeMap::new();
        root.insert(Bytes::from_static(KEY_ANNOUNCE), Value::string(&self.announce));
        root.insert(
            Bytes::from_static(KEY_CREATED_BY),
            Value::string(&self.created_by),
        );
        root.insert(
            Bytes::from_static(KEY_CREATION_DATE),
            Value::Integer(self.creation_date),
        );
        root.insert(Bytes::from_static(KEY_INFO), self.info.to_value()?);
        Ok(Value::Dict(root))
    }

    /// Serializes the record to `.torrent` bytes.
    pub fn encode(&self) -> Result<Vec<u8>, MetainfoError> {
        Ok(encode(&self.to_value()?)?)
    }

    /// SHA1 of the bencoded info dictionary.
    pub fn info_hash(&self) -> Result<InfoHash, MetainfoError> {
        let raw_info = encode(&self.info.to_value()?)?;
        Ok(InfoHash::from_info_bytes(&raw_info))
    }

    /// Parses a record from `.torrent` bytes.
    ///
    /// # Errors
    ///
    /// Fails if the data is not valid bencode, a required field is missing or
    /// has the wrong type, or `pieces` is not a multiple of 20 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        let root = decode(data)?;
        root.as_dict().ok_or(MetainfoError::InvalidField("root"))?;

        let announce = root
            .get(KEY_ANNOUNCE)
            .and_then(|v| v.as_str())
            .ok_or(MetainfoError::MissingField("announce"))?
            .to_string();

        let created_by = root
            .get(KEY_CREATED_BY)
            .and_then(|v| v.as_str())
            .ok_or(MetainfoError::MissingField("createdby"))?
            .to_string();

        let creation_date = root
            .get(KEY_CREATION_DATE)
            .and_then(|v| v.as_integer())
            .ok_or(MetainfoError::MissingField("creationdate"))?;

        let info = root
            .get(KEY_INFO)
            .ok_or(MetainfoError::MissingField("info"))
            .and_then(Info::parse)?;

        Ok(Self {
            announce,
            created_by,
            creation_date,
            info,
        })
    }
}

fn to_integer(n: u64, field: &'static str) -> Result<i64, MetainfoError> {
    i64::try_from(n).map_err(|_| MetainfoError::InvalidField(field))
}

fn file_to_value(file: &FileEntry) -> Result<Value, MetainfoError> {
    let mut dict = BTreeMap::new();
    dict.insert(
        Bytes::from_static(KEY_LENGTH),
        Value::Integer(to_integer(file.length, "file length")?),
    );
    dict.insert(
        Bytes::from_static(KEY_PATH),
        Value::List(file.path.iter().map(|s| Value::string(s)).collect()),
    );
    Ok(Value::Dict(dict))
}

fn parse_length(value: &Value) -> Result<u64, MetainfoError> {
    value
        .as_integer()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or(MetainfoError::InvalidField("length"))
}

fn parse_file(value: &Value) -> Result<FileEntry, MetainfoError> {
    let length = parse_length(
        value
            .get(KEY_LENGTH)
            .ok_or(MetainfoError::MissingField("file length"))?,
    )?;

    let path = value
        .get(KEY_PATH)
        .and_then(|v| v.as_list())
        .ok_or(MetainfoError::MissingField("file path"))?
        .iter()
        .map(|segment| {
            segment
                .as_str()
                .map(String::from)
                .ok_or(MetainfoError::InvalidField("file path"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if path.is_empty() {
        return Err(MetainfoError::InvalidField("file path"));
    }

    Ok(FileEntry::new(path, length))
}
