mod error;


pub use error::JoinError;

use crate::config::{DEFAULT_BUFFER_SIZE, Settings};
use crate::naming::{PieceIndex, piece_name};
use crate::splitter::ProgressSink;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Summary of a completed join
#[derive(Debug, Clone, Serialize)]
pub struct JoinReport {
    pub output: PathBuf,
    pub piece_count: usize,
    pub total_bytes: u64,
    /// Lowercase hex SHA-256 of the reconstructed file
    pub sha256: String,
}

/// Rebuilds a split file by concatenating its pieces in index order
#[derive(Debug, Clone)]
pub struct PieceJoiner {
    buffer_size: usize,
    overwrite: bool,
}

impl PieceJoiner {
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            overwrite: false,
        }
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self::new().buffer_size(settings.buffer_size)
    }

    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Replace an existing output file instead of refusing
    pub fn overwrite(mut self, enabled: bool) -> Self {
        self.overwrite = enabled;
        self
    }

    /// Find the pieces of `source` and concatenate them into `output`
    ///
    /// Pieces are looked up as `piece_name(source, 0)`, `1`, ... up to the
    /// first missing index. On failure the partial output is removed.
    pub fn join(
        &self,
        source: &Path,
        output: &Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<JoinReport, JoinError> {
        let pieces = discover_pieces(source);

        if pieces.is_empty() {
            return Err(JoinError::NoPieces {
                source_path: source.to_path_buf(),
                first_piece: piece_name(source, 0),
            });
        }

        if pieces.iter().any(|p| p == output) {
            return Err(JoinError::OutputIsPiece {
                path: output.to_path_buf(),
            });
        }

        if output.exists() && !self.overwrite {
            return Err(JoinError::OutputExists {
                path: output.to_path_buf(),
            });
        }

        let file = File::create(output).map_err(|e| JoinError::Write {
            path: output.to_path_buf(),
            source: e,
        })?;

        let result = self.concatenate(&pieces, file, output, progress);

        let (total_bytes, sha256) = match result {
            Ok(done) => done,
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(output) {
                    warn!(path = %output.display(), error = %cleanup, "failed to remove partial output");
                }
                return Err(e);
            }
        };

        info!(
            output = %output.display(),
            pieces = pieces.len(),
            bytes = total_bytes,
            "join complete"
        );

        Ok(JoinReport {
            output: output.to_path_buf(),
            piece_count: pieces.len(),
            total_bytes,
            sha256,
        })
    }

    fn concatenate(
        &self,
        pieces: &[PathBuf],
        file: File,
        output: &Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<(u64, String), JoinError> {
        let write_err = |e: io::Error| JoinError::Write {
            path: output.to_path_buf(),
            source: e,
        };

        let mut writer = BufWriter::with_capacity(self.buffer_size, file);
        let mut buffer = vec![0u8; self.buffer_size];
        let mut hasher = Sha256::new();
        let mut total = 0u64;

        for piece in pieces {
            progress.message(&format!("Appending file {}", piece.display()));

            let read_err = |e: io::Error| JoinError::Read {
                path: piece.clone(),
                source: e,
            };
            let mut reader = File::open(piece).map_err(read_err)?;

            loop {
                let read = match reader.read(&mut buffer) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(read_err(e)),
                };

                hasher.update(&buffer[..read]);
                writer.write_all(&buffer[..read]).map_err(write_err)?;
                total += read as u64;
            }
        }

        let file = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
        file.sync_all().map_err(write_err)?;

        Ok((total, hex::encode(hasher.finalize())))
    }
}

impl Default for PieceJoiner {
    fn default() -> Self {
        Self::new()
    }
}

/// List the existing pieces of `source` in index order, stopping at the first gap
pub fn discover_pieces(source: &Path) -> Vec<PathBuf> {
    let mut pieces = Vec::new();
    let mut index: PieceIndex = 0;

    loop {
        let candidate = piece_name(source, index);
        if !candidate.is_file() {
            break;
        }
        pieces.push(candidate);
        index += 1;
    }

    pieces
}
