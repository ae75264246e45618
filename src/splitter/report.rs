use crate::naming::PieceIndex;
use crate::size::ByteCount;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// A piece file that was written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceRecord {
    pub index: PieceIndex,
    pub path: PathBuf,
    /// Length in bytes
    pub len: u64,
    /// Lowercase hex SHA-256 of the piece contents
    pub sha256: String,
}

/// Summary of a completed split
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub source: PathBuf,
    pub source_len: u64,
    pub max_bytes: ByteCount,
    pub started_at: DateTime<Utc>,
    pub pieces: Vec<PieceRecord>,
    /// Pieces from an earlier, longer split that were deleted
    pub stale_removed: usize,
}

impl SplitReport {
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Sum of all piece lengths; equals `source_len` for a completed split
    pub fn bytes_written(&self) -> u64 {
        self.pieces.iter().map(|p| p.len).sum()
    }
}
