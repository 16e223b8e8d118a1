//! Torrent creation: enumerate the target, hash its pieces, assemble the
//! record.
//!
//! The pipeline runs two blocking tasks joined by a bounded channel of paths:
//!
//! ```text
//! enumerate ──(path, path, ...)──> hash_channel ──> PieceDigests
//!     │                                                  │
//!     └──────────── Vec<FileEntry> ──────────────> MetainfoRecord::assemble
//! ```
//!
//! The enumerator sends each file's path right after recording its
//! [`FileEntry`](crate::metainfo::FileEntry), so the hasher reads files in
//! exactly the order their lengths appear in the torrent. Dropping the sender
//! is the completion signal; [`TorrentBuilder::build`] waits for both tasks
//! before assembling.
//!
//! Pieces span file boundaries: the hasher treats all files as one continuous
//! stream and only cuts at multiples of the piece length.

mod builder;
mod enumerate;
mod error;
mod hasher;

pub use builder::{write_torrent, TorrentBuilder};
pub use enumerate::{enumerate, enumerate_with, target_name, Enumeration};
pub use error::CreateError;
pub use hasher::{hash_channel, PieceHasher};
