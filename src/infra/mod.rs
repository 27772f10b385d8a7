//! Content hashing and atomic file writes

mod content_hash;
mod fs;

pub use content_hash::{ContentHash, ContentHashError};
pub use fs::{FsError, write_atomic};
