//! torrent-builder - Creates BitTorrent v1 metainfo files
//!
//! Given a file or a directory, this crate hashes the contents in fixed-size
//! pieces and produces the bencoded `.torrent` descriptor for it.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding
//! - [`metainfo`] - Metainfo records: files, piece digests, info hash
//! - [`create`] - Directory enumeration, piece hashing and the builder pipeline
//! - [`constants`] - Default piece length, tracker and buffer sizes
//!
//! # Example
//!
//! ```no_run
//! use torrent_builder::{write_torrent, TorrentBuilder};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let builder = TorrentBuilder::new()
//!     .announce("http://tracker.example.com/announce")
//!     .piece_length(256 * 1024);
//!
//! let record = builder.build("path/to/album").await?;
//! let written = write_torrent(&record, ".")?;
//! println!("wrote {}", written.display());
//! # Ok(())
//! # }
//! ```

pub mod bencode;
pub mod constants;
pub mod create;
pub mod metainfo;

pub use bencode::{decode, encode, BencodeError, Value};
pub use create::{write_torrent, CreateError, PieceHasher, TorrentBuilder};
pub use metainfo::{
    FileEntry, Info, InfoHash, InfoKind, MetainfoError, MetainfoRecord, PieceDigests,
};
