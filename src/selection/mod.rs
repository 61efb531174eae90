//! Pending selection: regions staged for capture along with their variants.

mod core;

pub use self::core::{PendingEntry, SelectionStore};
