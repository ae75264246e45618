use crate::naming::{PieceIndex, piece_name};
use crate::size::ByteCount;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Byte range of the source covered by one piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePlan {
    pub index: PieceIndex,
    pub offset: u64,
    pub len: u64,
}

/// Iterator over the pieces of a source of `total` bytes
///
/// Every piece is `max_bytes` long except possibly the last one, which
/// holds the remainder. A zero-length source yields nothing; an exact
/// multiple never yields a trailing empty piece.
#[derive(Debug, Clone)]
pub struct PiecePlanner {
    total: u64,
    max_bytes: ByteCount,
    consumed: u64,
    index: PieceIndex,
}

/// Plan the pieces for a source of `total` bytes. `max_bytes` must be non-zero.
pub fn plan_pieces(total: u64, max_bytes: ByteCount) -> PiecePlanner {
    debug_assert!(max_bytes > 0, "max_bytes must be non-zero");
    PiecePlanner {
        total,
        max_bytes,
        consumed: 0,
        index: 0,
    }
}

impl PiecePlanner {
    /// Total number of pieces this planner produces
    pub fn piece_count(&self) -> u64 {
        self.total.div_ceil(self.max_bytes)
    }
}

impl Iterator for PiecePlanner {
    type Item = PiecePlan;

    fn next(&mut self) -> Option<PiecePlan> {
        if self.consumed >= self.total {
            return None;
        }

        let len = self.max_bytes.min(self.total - self.consumed);
        let plan = PiecePlan {
            index: self.index,
            offset: self.consumed,
            len,
        };

        self.consumed += len;
        self.index += 1;

        Some(plan)
    }
}

/// One planned output file, as reported by a dry run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPiece {
    pub index: PieceIndex,
    pub path: PathBuf,
    pub offset: u64,
    pub len: u64,
}

/// The full set of pieces a split would write, without writing them
#[derive(Debug, Clone, Serialize)]
pub struct SplitPlan {
    pub source: PathBuf,
    pub source_len: u64,
    pub max_bytes: ByteCount,
    pub pieces: Vec<PlannedPiece>,
}

impl SplitPlan {
    pub(crate) fn new(source: &Path, source_len: u64, max_bytes: ByteCount) -> Self {
        let pieces = plan_pieces(source_len, max_bytes)
            .map(|plan| PlannedPiece {
                index: plan.index,
                path: piece_name(source, plan.index),
                offset: plan.offset,
                len: plan.len,
            })
            .collect();

        Self {
            source: source.to_path_buf(),
            source_len,
            max_bytes,
            pieces,
        }
    }
}
