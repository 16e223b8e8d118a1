//! Torrent metainfo records ([BEP-3]).
//!
//! A [`MetainfoRecord`] is the structured content of a `.torrent` file before
//! it is bencoded:
//!
//! - **announce** - Tracker URL
//! - **createdby** - Tool that produced the file
//! - **creationdate** - Unix timestamp of the run
//! - **info** - Core metadata (hashed to create the info hash)
//!   - `name` - File name (single-file) or directory name (multi-file)
//!   - `piece length` - Size of each piece in bytes
//!   - `pieces` - Concatenated SHA1 hashes of each piece
//!   - `length` - Total size (single-file) OR `files` list (multi-file)
//!
//! Records are assembled once from the enumerated [`FileEntry`] list and the
//! finished [`PieceDigests`], then encoded. [`MetainfoRecord::from_bytes`]
//! parses the encoded form back, which is how the output is verified.
//!
//! ```
//! use torrent_builder::metainfo::{
//!     FileEntry, MetainfoRecord, PieceDigests, StaticFields, TargetKind,
//! };
//!
//! let record = MetainfoRecord::assemble(
//!     "a.bin".to_string(),
//!     TargetKind::File,
//!     vec![FileEntry::new(vec!["a.bin".to_string()], 0)],
//!     PieceDigests::from_bytes(&[0u8; 20]).unwrap(),
//!     StaticFields::default(),
//! );
//!
//! let bytes = record.encode().unwrap();
//! let parsed = MetainfoRecord::from_bytes(&bytes).unwrap();
//! assert_eq!(parsed, record);
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod error;
mod info_hash;
mod pieces;
mod record;

pub use error::MetainfoError;
pub use info_hash::InfoHash;
pub use pieces::{PieceDigests, DIGEST_LEN};
pub use record::{FileEntry, Info, InfoKind, MetainfoRecord, StaticFields, TargetKind};
