use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::component_cleanup::domain::{ComponentRef, DeletionReport};

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Store fault, snapshot I/O error, unknown solution, etc.
    ApplicationError = 3,
    /// A cascading delete aborted after it had already modified the store
    PartialFailure = 4,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::PartialFailure => write!(f, "Partial Failure (4)"),
        }
    }
}

/// Application-level errors.
///
/// Store-level failures are [`crate::ports::outbound::StoreError`]; these
/// variants cover the surrounding workflow.
#[derive(Debug, Error)]
pub enum PrunerError {
    #[error("Snapshot file not found: {path}\n\n💡 Hint: Pass an existing snapshot with --snapshot or set 'snapshot' in the config file")]
    SnapshotNotFound { path: PathBuf },

    #[error("Failed to parse snapshot file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the snapshot is valid JSON produced by an export")]
    SnapshotParseError { path: PathBuf, details: String },

    #[error("Failed to write snapshot file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    SnapshotWriteError { path: PathBuf, details: String },

    #[error("Failed to write output file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Solution {unique_name} could not be found\n\n💡 Hint: Solution names are unique names, not display names")]
    SolutionNotFound { unique_name: String },

    #[error("{component} is not part of solution {unique_name}")]
    ComponentNotInSolution {
        component: ComponentRef,
        unique_name: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A store fault interrupted a cascading delete. Components listed in
    /// `report` were already processed and stay deleted.
    #[error("Cascading delete of {target} stopped after {} of its components were removed: {source}", report.removed_count())]
    PartialDeletion {
        target: ComponentRef,
        report: DeletionReport,
        #[source]
        source: anyhow::Error,
    },
}

impl PrunerError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            PrunerError::PartialDeletion { report, .. } if report.removed_count() > 0 => {
                ExitCode::PartialFailure
            }
            _ => ExitCode::ApplicationError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_cleanup::domain::{ComponentKind, DeletionOutcome};
    use uuid::Uuid;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
        assert_eq!(ExitCode::PartialFailure.as_i32(), 4);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::PartialFailure),
            "Partial Failure (4)"
        );
    }

    #[test]
    fn test_snapshot_not_found_display() {
        let error = PrunerError::SnapshotNotFound {
            path: PathBuf::from("/tmp/org.json"),
        };
        let display = format!("{}", error);
        assert!(display.contains("Snapshot file not found"));
        assert!(display.contains("/tmp/org.json"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_solution_not_found_display() {
        let error = PrunerError::SolutionNotFound {
            unique_name: "ContosoCore".to_string(),
        };
        assert!(format!("{}", error).contains("ContosoCore"));
        assert_eq!(error.exit_code(), ExitCode::ApplicationError);
    }

    #[test]
    fn test_partial_deletion_exit_code() {
        let target = ComponentRef::new(ComponentKind::PluginAssembly, Uuid::new_v4());
        let mut report = DeletionReport::new();
        report.record(
            ComponentRef::new(ComponentKind::SdkMessageProcessingStep, Uuid::new_v4()),
            DeletionOutcome::Deleted { deactivated: false },
        );
        let error = PrunerError::PartialDeletion {
            target,
            report,
            source: anyhow::anyhow!("permission denied"),
        };
        assert_eq!(error.exit_code(), ExitCode::PartialFailure);
        let display = format!("{}", error);
        assert!(display.contains("1 of its components"));
        assert!(display.contains("permission denied"));
    }

    #[test]
    fn test_partial_deletion_without_progress_is_plain_failure() {
        let error = PrunerError::PartialDeletion {
            target: ComponentRef::new(ComponentKind::Role, Uuid::nil()),
            report: DeletionReport::new(),
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(error.exit_code(), ExitCode::ApplicationError);
    }
}
