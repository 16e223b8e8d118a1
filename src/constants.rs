//! Reference values and tuning parameters.
//!
//! Defaults here are what the command-line tool uses when no flag overrides
//! them.

// ============================================================================
// Metainfo defaults
// ============================================================================

/// Default piece length (32 MiB).
///
/// Fixed for a whole run and not derived from the input size.
pub const DEFAULT_PIECE_LENGTH: u64 = 32 * 1024 * 1024;

/// Tracker URL written to `announce` by default.
pub const DEFAULT_ANNOUNCE: &str = "https://www.pttime.org/announce.php";

/// Creator string written to `createdby` by default.
pub const DEFAULT_CREATED_BY: &str = concat!("torrent-builder v", env!("CARGO_PKG_VERSION"));

/// Extension appended to the target's base name for the output file.
pub const TORRENT_EXTENSION: &str = "torrent";

// ============================================================================
// Hashing pipeline
// ============================================================================

/// Largest single read the piece hasher issues (1 MiB).
///
/// Reads are further capped so they never cross a piece boundary.
pub const READ_BUFFER_SIZE: usize = 1024 * 1024;

/// Paths the enumerator may queue ahead of the hasher.
pub const PATH_CHANNEL_CAPACITY: usize = 64;

/// Deepest directory nesting the enumerator descends into.
///
/// Symlink cycles are caught separately, by comparing canonical paths.
pub const MAX_DIRECTORY_DEPTH: usize = 64;
