//! Committed capture queue, consumed in FIFO order by the capture process.

mod core;

pub use self::core::{CommitReport, QueueEntry, QueueStore};
