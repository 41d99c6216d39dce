/// Shared helpers for integration tests
pub mod mocks;

use solution_pruner::prelude::*;
use std::path::Path;

pub const PLUGIN_ORG: &str = "tests/fixtures/plugin-org.json";

/// Loads a snapshot fixture relative to the crate root
pub fn load_fixture(path: &str) -> Snapshot {
    SnapshotFile::load(Path::new(path)).unwrap()
}
