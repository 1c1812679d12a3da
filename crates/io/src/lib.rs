// Grid file I/O operations

pub mod error;
pub mod export;
pub mod native;

/// Native .grid format version
/// Increment when the schema changes in a way old versions can't read
pub const NATIVE_FORMAT_VERSION: u32 = 1;
