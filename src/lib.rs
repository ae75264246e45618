// Public API exports
pub mod cli;
pub mod config;
pub mod exit;
pub mod joiner;
pub mod naming;
pub mod size;
pub mod splitter;
pub mod telemetry;

// Re-export main types for convenience
pub use config::Settings;
pub use exit::ExitStatus;

pub use size::{ByteCount, FormatError, format_byte_count, parse_size_spec};

pub use naming::{PieceIndex, piece_name};

pub use splitter::{
    ConsoleProgress, FileSplitter, PieceRecord, ProgressSink, SplitError, SplitOutcome,
    SplitPlan, SplitReport, SplitRequest, TracingProgress,
};

pub use joiner::{JoinError, JoinReport, PieceJoiner, discover_pieces};
