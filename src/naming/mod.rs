use std::ffi::OsString;
use std::path::{Path, PathBuf};


/// Zero-based position of a piece within one split
pub type PieceIndex = u64;

/// Minimum number of digits used to render a piece index
pub const INDEX_WIDTH: usize = 3;

/// Compute the output path of the `index`th piece of `source`
///
/// `dir/name.ext` becomes `dir/name.007.ext`; an extensionless
/// `dir/name` becomes `dir/name.007`. Indices past 999 simply grow
/// wider (`name.1000.ext`) so names stay unique for any piece count.
///
/// Dot-files such as `.bashrc` and names with an empty trailing
/// extension (`name.`) count as extensionless.
pub fn piece_name(source: &Path, index: PieceIndex) -> PathBuf {
    let rendered = format!("{:0width$}", index, width = INDEX_WIDTH);

    let extension = source.extension().filter(|ext| !ext.is_empty());

    let file_name = match (source.file_stem(), extension) {
        (Some(stem), Some(ext)) => {
            let mut name = OsString::from(stem);
            name.push(".");
            name.push(&rendered);
            name.push(".");
            name.push(ext);
            name
        }
        _ => {
            let mut name = source
                .file_name()
                .map(OsString::from)
                .unwrap_or_default();
            name.push(".");
            name.push(&rendered);
            name
        }
    };

    source.with_file_name(file_name)
}
