use super::{ComponentDescriptor, ComponentRef, SolutionRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Platform dependency type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum DependencyKind {
    None,
    /// Both ends live in the same solution; never blocks a delete
    SolutionInternal,
    Published,
    Unpublished,
    Other(i32),
}

impl DependencyKind {
    /// Whether this edge prevents its required component from being deleted.
    pub fn blocks_delete(self) -> bool {
        !matches!(self, DependencyKind::SolutionInternal)
    }
}

impl From<i32> for DependencyKind {
    fn from(code: i32) -> Self {
        match code {
            0 => DependencyKind::None,
            1 => DependencyKind::SolutionInternal,
            2 => DependencyKind::Published,
            4 => DependencyKind::Unpublished,
            other => DependencyKind::Other(other),
        }
    }
}

impl From<DependencyKind> for i32 {
    fn from(kind: DependencyKind) -> Self {
        match kind {
            DependencyKind::None => 0,
            DependencyKind::SolutionInternal => 1,
            DependencyKind::Published => 2,
            DependencyKind::Unpublished => 4,
            DependencyKind::Other(code) => code,
        }
    }
}

/// Raw dependency row as returned by the store.
///
/// `dependent` cannot be removed while `required` exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRecord {
    pub dependency_id: Uuid,
    pub kind: DependencyKind,
    pub dependent: ComponentRef,
    pub dependent_base_solution_id: Uuid,
    pub required: ComponentRef,
    pub required_base_solution_id: Uuid,
}

/// Which end of an edge a traversal moves towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Components that depend on the root
    Dependents,
    /// Components the root depends on
    Requirements,
}

impl DependencyRecord {
    pub fn far_end(&self, direction: Direction) -> ComponentRef {
        match direction {
            Direction::Dependents => self.dependent,
            Direction::Requirements => self.required,
        }
    }
}

/// Dependency record with both endpoints resolved to descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub dependency_id: Uuid,
    pub kind: DependencyKind,
    pub dependent: ComponentDescriptor,
    pub dependent_solution: SolutionRef,
    pub required: ComponentDescriptor,
    pub required_solution: SolutionRef,
}

impl DependencyEdge {
    pub fn far_end(&self, direction: Direction) -> &ComponentDescriptor {
        match direction {
            Direction::Dependents => &self.dependent,
            Direction::Requirements => &self.required,
        }
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.dependent, self.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_cleanup::domain::ComponentKind;

    #[test]
    fn test_solution_internal_does_not_block() {
        assert!(!DependencyKind::SolutionInternal.blocks_delete());
        assert!(DependencyKind::Published.blocks_delete());
        assert!(DependencyKind::Other(8).blocks_delete());
    }

    #[test]
    fn test_dependency_kind_codes() {
        assert_eq!(DependencyKind::from(4), DependencyKind::Unpublished);
        assert_eq!(i32::from(DependencyKind::SolutionInternal), 1);
        assert_eq!(DependencyKind::from(7), DependencyKind::Other(7));
    }

    #[test]
    fn test_far_end_follows_direction() {
        let step = ComponentRef::new(ComponentKind::SdkMessageProcessingStep, Uuid::new_v4());
        let assembly = ComponentRef::new(ComponentKind::PluginAssembly, Uuid::new_v4());
        let record = DependencyRecord {
            dependency_id: Uuid::new_v4(),
            kind: DependencyKind::Published,
            dependent: step,
            dependent_base_solution_id: Uuid::nil(),
            required: assembly,
            required_base_solution_id: Uuid::nil(),
        };
        assert_eq!(record.far_end(Direction::Dependents), step);
        assert_eq!(record.far_end(Direction::Requirements), assembly);
    }
}
