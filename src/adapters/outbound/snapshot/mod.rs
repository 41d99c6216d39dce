mod in_memory_store;
mod snapshot_file;

pub use in_memory_store::InMemoryComponentStore;
pub use snapshot_file::{Snapshot, SnapshotFile};
