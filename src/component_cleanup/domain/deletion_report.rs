use super::ComponentRef;
use serde::Serialize;
use std::fmt;

/// Why a component was intentionally left in place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreservationReason {
    /// Hidden/protected instance of a configurable step
    Protected,
    /// Composite flow definitions are rewritten, never deleted
    CompositeFlow,
}

/// What the dispatcher did with one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeletionOutcome {
    Deleted { deactivated: bool },
    Preserved { reason: PreservationReason },
    SkippedManaged,
    /// The component vanished before it could be deleted
    Missing,
    Unsupported,
    /// Dry run: the mutation was announced but not issued
    WhatIf,
}

impl DeletionOutcome {
    pub fn removed(&self) -> bool {
        matches!(self, DeletionOutcome::Deleted { .. })
    }
}

impl fmt::Display for DeletionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionOutcome::Deleted { deactivated: true } => write!(f, "deactivated and deleted"),
            DeletionOutcome::Deleted { deactivated: false } => write!(f, "deleted"),
            DeletionOutcome::Preserved {
                reason: PreservationReason::Protected,
            } => write!(f, "preserved (protected)"),
            DeletionOutcome::Preserved {
                reason: PreservationReason::CompositeFlow,
            } => write!(f, "preserved (composite flow rewritten)"),
            DeletionOutcome::SkippedManaged => write!(f, "skipped (managed)"),
            DeletionOutcome::Missing => write!(f, "missing"),
            DeletionOutcome::Unsupported => write!(f, "unsupported kind"),
            DeletionOutcome::WhatIf => write!(f, "what-if"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionEntry {
    pub component: ComponentRef,
    #[serde(flatten)]
    pub outcome: DeletionOutcome,
}

/// Ordered record of every component a cascading delete processed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    entries: Vec<DeletionEntry>,
}

impl DeletionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, component: ComponentRef, outcome: DeletionOutcome) {
        self.entries.push(DeletionEntry { component, outcome });
    }

    pub fn entries(&self) -> &[DeletionEntry] {
        &self.entries
    }

    pub fn outcome_of(&self, component: &ComponentRef) -> Option<&DeletionOutcome> {
        self.entries
            .iter()
            .find(|entry| entry.component == *component)
            .map(|entry| &entry.outcome)
    }

    pub fn removed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.removed()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
