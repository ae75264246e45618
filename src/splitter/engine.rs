use super::plan::{PiecePlan, SplitPlan, plan_pieces};
use super::{PieceRecord, ProgressSink, SplitError, SplitOutcome, SplitReport, SplitRequest};
use crate::config::{DEFAULT_BUFFER_SIZE, Settings};
use crate::naming::{PieceIndex, piece_name};
use crate::size::{format_byte_count, parse_size_spec};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Splits one source file into numbered pieces of at most a given size
#[derive(Debug, Clone)]
pub struct FileSplitter {
    buffer_size: usize,
    sync_pieces: bool,
}

impl FileSplitter {
    /// Create a splitter with default settings
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            sync_pieces: false,
        }
    }

    /// Create a splitter from loaded settings
    pub fn with_settings(settings: &Settings) -> Self {
        Self::new()
            .buffer_size(settings.buffer_size)
            .sync_pieces(settings.sync_pieces)
    }

    /// Set the copy buffer size (clamped to at least one byte)
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Fsync every piece before moving on to the next one
    pub fn sync_pieces(mut self, enabled: bool) -> Self {
        self.sync_pieces = enabled;
        self
    }

    /// Split the source described by `request`
    ///
    /// The size specification is validated before the filesystem is
    /// touched. Pieces are written strictly one after another next to the
    /// source; each is complete and closed before the next is created.
    ///
    /// Pieces left over from an earlier, longer split of the same source
    /// are deleted afterwards, so joining always sees exactly this run's
    /// pieces. If the run fails, every piece it wrote is deleted again.
    pub fn split(&self, request: SplitRequest, progress: &mut dyn ProgressSink) -> SplitOutcome {
        let started_at = Utc::now();
        let max_bytes = parse_size_spec(&request.max_bytes_spec)?;
        let source_path = request.source_path;

        let (mut source, source_len) = open_source(&source_path)?;

        let planner = plan_pieces(source_len, max_bytes);

        progress.message(&format!(
            "Splitting {} ({} bytes) into {} piece(s) of at most {} bytes",
            source_path.display(),
            source_len,
            planner.piece_count(),
            format_byte_count(max_bytes)
        ));
        progress.message(&format!("Buffer size: {} bytes", self.buffer_size));

        let mut buffer = vec![0u8; self.buffer_size];
        let mut pieces = Vec::new();

        for plan in planner {
            let path = piece_name(&source_path, plan.index);
            progress.message(&format!("Creating file {}", path.display()));

            let written = self.write_piece(
                &mut source,
                &source_path,
                source_len,
                &plan,
                &path,
                &mut buffer,
            );

            let sha256 = match written {
                Ok(digest) => digest,
                Err(err) => {
                    discard_written(&pieces);
                    return Err(err);
                }
            };

            debug!(
                index = plan.index,
                len = plan.len,
                path = %path.display(),
                "piece written"
            );

            pieces.push(PieceRecord {
                index: plan.index,
                path,
                len: plan.len,
                sha256,
            });
        }

        let stale_removed = match remove_stale_pieces(&source_path, pieces.len() as PieceIndex) {
            Ok(count) => count,
            Err(err) => {
                discard_written(&pieces);
                return Err(err);
            }
        };

        if stale_removed > 0 {
            progress.message(&format!("Removed {} leftover piece(s)", stale_removed));
        }

        info!(
            source = %source_path.display(),
            pieces = pieces.len(),
            stale_removed,
            bytes = source_len,
            "split complete"
        );

        Ok(SplitReport {
            source: source_path,
            source_len,
            max_bytes,
            started_at,
            pieces,
            stale_removed,
        })
    }

    /// Validate the request and compute the pieces without writing anything
    pub fn plan(&self, request: &SplitRequest) -> Result<SplitPlan, SplitError> {
        let max_bytes = parse_size_spec(&request.max_bytes_spec)?;
        let (_source, source_len) = open_source(&request.source_path)?;

        Ok(SplitPlan::new(&request.source_path, source_len, max_bytes))
    }

    /// Create `dest` and fill it with exactly `plan.len` bytes from `source`
    ///
    /// Returns the hex SHA-256 of the piece. If anything fails after the
    /// file was created, the partial file is deleted.
    fn write_piece<R: Read>(
        &self,
        source: &mut R,
        source_path: &Path,
        source_len: u64,
        plan: &PiecePlan,
        dest: &Path,
        buffer: &mut [u8],
    ) -> Result<String, SplitError> {
        let file = File::create(dest).map_err(|e| SplitError::Write {
            path: dest.to_path_buf(),
            source: e,
        })?;

        let result = self.fill_piece(source, source_path, source_len, plan, file, dest, buffer);

        if result.is_err() {
            discard_partial(dest);
        }

        result
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_piece<R: Read>(
        &self,
        source: &mut R,
        source_path: &Path,
        source_len: u64,
        plan: &PiecePlan,
        mut file: File,
        dest: &Path,
        buffer: &mut [u8],
    ) -> Result<String, SplitError> {
        let write_err = |e: io::Error| SplitError::Write {
            path: dest.to_path_buf(),
            source: e,
        };

        let mut hasher = Sha256::new();
        let mut remaining = plan.len;

        while remaining > 0 {
            let want = usize::try_from(remaining)
                .map_or(buffer.len(), |r| r.min(buffer.len()));

            let read = match source.read(&mut buffer[..want]) {
                Ok(0) => {
                    return Err(SplitError::Truncated {
                        path: source_path.to_path_buf(),
                        expected: source_len,
                        actual: plan.offset + (plan.len - remaining),
                    });
                }
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(SplitError::Read {
                        path: source_path.to_path_buf(),
                        source: e,
                    });
                }
            };

            hasher.update(&buffer[..read]);
            file.write_all(&buffer[..read]).map_err(write_err)?;
            remaining -= read as u64;
        }

        file.flush().map_err(write_err)?;
        if self.sync_pieces {
            file.sync_all().map_err(write_err)?;
        }

        Ok(hex::encode(hasher.finalize()))
    }
}

impl Default for FileSplitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Open the source and capture its length; directories and other
/// non-regular files are refused
fn open_source(path: &Path) -> Result<(File, u64), SplitError> {
    let unavailable = |e: io::Error| SplitError::SourceUnavailable {
        path: path.to_path_buf(),
        source: e,
    };

    let file = File::open(path).map_err(unavailable)?;
    let metadata = file.metadata().map_err(unavailable)?;

    if !metadata.is_file() {
        return Err(SplitError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    Ok((file, metadata.len()))
}

/// Delete consecutive pieces of `source` starting at index `from`
///
/// Stops at the first index with no regular file, which is also where a
/// join stops looking.
fn remove_stale_pieces(source: &Path, from: PieceIndex) -> Result<usize, SplitError> {
    let mut removed = 0;
    let mut index = from;

    loop {
        let path = piece_name(source, index);
        if !path.is_file() {
            return Ok(removed);
        }

        fs::remove_file(&path).map_err(|e| SplitError::StalePiece {
            path: path.clone(),
            source: e,
        })?;
        debug!(index, path = %path.display(), "removed leftover piece");

        removed += 1;
        index += 1;
    }
}

/// Remove the completed pieces of a run that failed
fn discard_written(pieces: &[PieceRecord]) {
    for piece in pieces {
        discard_partial(&piece.path);
    }
}

fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "failed to remove partial piece");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_short_read_is_truncation_and_discards_piece() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("short.000.bin");
        let splitter = FileSplitter::new().buffer_size(4);

        // Claims 10 bytes but only 6 are available
        let mut source = Cursor::new(vec![7u8; 6]);
        let plan = PiecePlan {
            index: 0,
            offset: 0,
            len: 10,
        };
        let mut buffer = vec![0u8; 4];

        let result = splitter.write_piece(
            &mut source,
            Path::new("short.bin"),
            10,
            &plan,
            &dest,
            &mut buffer,
        );

        match result {
            Err(SplitError::Truncated {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 10);
                assert_eq!(actual, 6);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
        assert!(!dest.exists(), "partial piece must not be left behind");
    }

    #[test]
    fn test_truncation_offset_accounts_for_earlier_pieces() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("late.002.bin");
        let splitter = FileSplitter::new();

        let mut source = Cursor::new(vec![1u8; 3]);
        let plan = PiecePlan {
            index: 2,
            offset: 200,
            len: 100,
        };
        let mut buffer = vec![0u8; 64];

        let result = splitter.write_piece(
            &mut source,
            Path::new("late.bin"),
            300,
            &plan,
            &dest,
            &mut buffer,
        );

        assert!(matches!(
            result,
            Err(SplitError::Truncated { actual: 203, expected: 300, .. })
        ));
    }

    #[test]
    fn test_piece_hash_matches_contents() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("hash.000");
        let splitter = FileSplitter::new().buffer_size(3);

        let mut source = Cursor::new(b"hello world".to_vec());
        let plan = PiecePlan {
            index: 0,
            offset: 0,
            len: 5,
        };
        let mut buffer = vec![0u8; 3];

        let digest = splitter
            .write_piece(&mut source, Path::new("hash"), 11, &plan, &dest, &mut buffer)
            .unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"hello");
        assert_eq!(digest, hex::encode(Sha256::digest(b"hello")));
    }

    #[test]
    fn test_buffer_size_is_clamped() {
        let splitter = FileSplitter::new().buffer_size(0);
        assert_eq!(splitter.buffer_size, 1);
    }
}
