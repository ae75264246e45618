use crate::exit::ExitStatus;
use crate::size::FormatError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid maximum piece size")]
    InvalidSize(#[from] FormatError),

    #[error("Cannot open source file {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Source is not a regular file: {}", .path.display())]
    NotAFile { path: PathBuf },

    #[error("Failed to read source file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "Source file {} ended after {actual} bytes, expected {expected}",
        .path.display()
    )]
    Truncated {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("Failed to remove leftover piece {}", .path.display())]
    StalePiece {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write piece {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SplitError {
    /// Exit status the command line reports for this failure
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            SplitError::InvalidSize(_) => ExitStatus::CommandLineError,
            _ => ExitStatus::ApplicationError,
        }
    }
}
