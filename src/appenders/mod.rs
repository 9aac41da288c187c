//! Appender implementations

pub mod console;
pub mod file;
pub mod memory;

#[cfg(feature = "notification")]
pub mod queue;

pub use console::{ConsoleAppender, ConsoleTarget};
pub use file::FileAppender;
pub use memory::MemoryAppender;

#[cfg(feature = "notification")]
pub use queue::QueueAppender;

pub use crate::core::Appender;
