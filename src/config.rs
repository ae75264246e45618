//! Optional JSON settings for the splitter.
//!
//! Every field has a default, so a missing file or a partial file is fine:
//!
//! ```json
//! { "buffer_size": 65536, "sync_pieces": true, "log_level": "debug" }
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default copy buffer size in bytes
pub const DEFAULT_BUFFER_SIZE: usize = 80 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Size of the buffer used to stream bytes from source to piece
    pub buffer_size: usize,
    /// Call `sync_all` on every piece before closing it
    pub sync_pieces: bool,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            sync_pieces: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .context(format!("Failed to read settings file: {}", path.display()))?;

        Self::from_json(&raw).context(format!("Invalid settings file: {}", path.display()))
    }

    /// Parse and validate settings from a JSON document
    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(raw).context("Failed to parse settings JSON")?;

        if settings.buffer_size == 0 {
            bail!("buffer_size must be greater than zero");
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.buffer_size, DEFAULT_BUFFER_SIZE);
        assert!(!settings.sync_pieces);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "sync_pieces": true }"#).unwrap();
        assert!(settings.sync_pieces);
        assert_eq!(settings.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let result = Settings::from_json(r#"{ "buffer_size": 0 }"#);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("buffer_size"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "buffer_size": 4096, "log_level": "debug" }}"#).unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.buffer_size, 4096);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Settings::load(Some(&dir.path().join("absent.json")));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read settings file")
        );
    }
}
