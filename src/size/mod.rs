mod error;
mod parser;


pub use error::FormatError;
pub use parser::{format_byte_count, parse_size_spec};

/// Exact, fully resolved maximum piece size in bytes
pub type ByteCount = u64;

pub const KIB: ByteCount = 1024;
pub const MIB: ByteCount = 1024 * KIB;
pub const GIB: ByteCount = 1024 * MIB;
