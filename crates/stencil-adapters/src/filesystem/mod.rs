//! Filesystem adapters.
//!
//! [`LocalFilesystem`] reads and writes the real disk; [`MemoryFilesystem`]
//! keeps everything in a map for tests.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
