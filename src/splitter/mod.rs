mod engine;
mod error;
mod plan;
mod progress;
mod report;


pub use engine::FileSplitter;
pub use error::SplitError;
pub use plan::{PiecePlan, PiecePlanner, PlannedPiece, SplitPlan, plan_pieces};
pub use progress::{ConsoleProgress, ProgressSink, TracingProgress};
pub use report::{PieceRecord, SplitReport};

use std::path::PathBuf;

/// Result of a split: the written pieces, or a classified failure
pub type SplitOutcome = Result<SplitReport, SplitError>;

/// What to split and how large each piece may be
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRequest {
    /// File to split; pieces are written into the same directory
    pub source_path: PathBuf,
    /// Maximum piece size, e.g. `500`, `64K`, `20M`
    pub max_bytes_spec: String,
}

impl SplitRequest {
    pub fn new(source_path: impl Into<PathBuf>, max_bytes_spec: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            max_bytes_spec: max_bytes_spec.into(),
        }
    }
}
