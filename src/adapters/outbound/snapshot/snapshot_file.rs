use crate::component_cleanup::domain::{
    DependencyRecord, EntityRecord, SchemaMetadata, SolutionComponent, SolutionRef,
};
use crate::shared::error::PrunerError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Maximum snapshot size (100 MB)
const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Exported state of an organisation: everything the in-memory store serves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub solutions: Vec<SolutionRef>,
    #[serde(default)]
    pub records: Vec<EntityRecord>,
    #[serde(default)]
    pub metadata: Vec<SchemaMetadata>,
    #[serde(default)]
    pub solution_components: Vec<SolutionComponent>,
    #[serde(default)]
    pub dependencies: Vec<DependencyRecord>,
}

/// Reads and writes [`Snapshot`]s as JSON files
pub struct SnapshotFile;

impl SnapshotFile {
    pub fn load(path: &Path) -> Result<Snapshot> {
        if !path.exists() {
            return Err(PrunerError::SnapshotNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = safe_read_file(path).map_err(|e| PrunerError::SnapshotParseError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| {
            PrunerError::SnapshotParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    pub fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(path, content).map_err(|e| {
            PrunerError::SnapshotWriteError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

/// Reads a regular file, refusing symbolic links and oversized files.
fn safe_read_file(path: &Path) -> Result<String> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read snapshot metadata: {}", e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }
    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }
    if metadata.len() > MAX_FILE_SIZE {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            MAX_FILE_SIZE
        );
    }

    fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read snapshot: {}", e))
}
