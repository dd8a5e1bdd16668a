//! Recorder implementations

mod file;
mod memory;

pub use file::FileRecorder;
pub use memory::MemoryRecorder;
