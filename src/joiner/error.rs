use crate::exit::ExitStatus;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("No pieces found for {} (expected {})", .source_path.display(), .first_piece.display())]
    NoPieces {
        source_path: PathBuf,
        first_piece: PathBuf,
    },

    #[error("Output file already exists: {}", .path.display())]
    OutputExists { path: PathBuf },

    #[error("Output file would overwrite one of its own pieces: {}", .path.display())]
    OutputIsPiece { path: PathBuf },

    #[error("Failed to read piece {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl JoinError {
    /// Every join failure is an environment problem
    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::ApplicationError
    }
}
