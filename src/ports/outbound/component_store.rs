use crate::component_cleanup::domain::{
    ComponentKind, ComponentRef, DependencyRecord, EntityRecord, MetadataKind, SchemaMetadata,
    SolutionComponent, SolutionRef,
};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Failure reported by a [`ComponentStore`].
///
/// `NotFound` is kept apart from every other failure because callers
/// tolerate it: dependency records may outlive the objects they name.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{what} does not exist")]
    NotFound { what: String },

    #[error("Store rejected {operation}: {reason}")]
    Rejected { operation: String, reason: String },

    #[error("Store fault during {operation}: {details}")]
    Fault { operation: String, details: String },
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        StoreError::NotFound { what: what.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// State transition requested through [`ComponentStore::set_state`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub state: i64,
    pub status: i64,
}

/// Request to place a component in a solution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToSolution {
    pub component: ComponentRef,
    pub solution_unique_name: String,
    /// Structural components are added without their sub-components
    pub exclude_subcomponents: bool,
}

/// ComponentStore port - the remote, metadata-driven platform
///
/// Every call is a blocking round trip; implementations must be safe to
/// share between independent top-level operations.
pub trait ComponentStore: Send + Sync {
    /// Dependencies that must be cleared before `component` may be deleted
    fn required_for_delete(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>>;

    /// Dependencies whose required end is `component`
    fn dependents_of(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>>;

    /// Dependencies whose dependent end is `component`
    fn requirements_of(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>>;

    /// Fetches a record-backed component. An empty projection returns every attribute.
    fn fetch_record(
        &self,
        kind: ComponentKind,
        id: Uuid,
        projection: &[&str],
    ) -> StoreResult<EntityRecord>;

    fn fetch_metadata(&self, kind: MetadataKind, metadata_id: Uuid) -> StoreResult<SchemaMetadata>;

    fn fetch_metadata_by_name(&self, kind: MetadataKind, name: &str) -> StoreResult<SchemaMetadata>;

    fn fetch_solution(&self, solution_id: Uuid) -> StoreResult<SolutionRef>;

    fn find_solution_by_name(&self, unique_name: &str) -> StoreResult<Option<SolutionRef>>;

    fn solutions_containing(&self, object_id: Uuid) -> StoreResult<Vec<SolutionRef>>;

    fn solution_components(&self, solution_id: Uuid) -> StoreResult<Vec<SolutionComponent>>;

    fn find_solution_component(
        &self,
        object_id: Uuid,
        solution_id: Uuid,
    ) -> StoreResult<Option<SolutionComponent>>;

    fn delete(&self, kind: ComponentKind, id: Uuid) -> StoreResult<()>;

    fn delete_structural_type(&self, logical_name: &str) -> StoreResult<()>;

    fn delete_relationship(&self, schema_name: &str) -> StoreResult<()>;

    fn delete_option_set(&self, name: &str) -> StoreResult<()>;

    fn set_state(&self, kind: ComponentKind, id: Uuid, change: StateChange) -> StoreResult<()>;

    fn update_record(
        &self,
        kind: ComponentKind,
        id: Uuid,
        attributes: Map<String, Value>,
    ) -> StoreResult<()>;

    fn add_component_to_solution(&self, request: &AddToSolution) -> StoreResult<()>;

    fn remove_component_from_solution(
        &self,
        component: &ComponentRef,
        solution_unique_name: &str,
    ) -> StoreResult<()>;
}

/// Lets borrowed stores be injected wherever an owned one is expected.
impl<S: ComponentStore + ?Sized> ComponentStore for &S {
    fn required_for_delete(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>> {
        (**self).required_for_delete(component)
    }

    fn dependents_of(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>> {
        (**self).dependents_of(component)
    }

    fn requirements_of(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>> {
        (**self).requirements_of(component)
    }

    fn fetch_record(
        &self,
        kind: ComponentKind,
        id: Uuid,
        projection: &[&str],
    ) -> StoreResult<EntityRecord> {
        (**self).fetch_record(kind, id, projection)
    }

    fn fetch_metadata(&self, kind: MetadataKind, metadata_id: Uuid) -> StoreResult<SchemaMetadata> {
        (**self).fetch_metadata(kind, metadata_id)
    }

    fn fetch_metadata_by_name(&self, kind: MetadataKind, name: &str) -> StoreResult<SchemaMetadata> {
        (**self).fetch_metadata_by_name(kind, name)
    }

    fn fetch_solution(&self, solution_id: Uuid) -> StoreResult<SolutionRef> {
        (**self).fetch_solution(solution_id)
    }

    fn find_solution_by_name(&self, unique_name: &str) -> StoreResult<Option<SolutionRef>> {
        (**self).find_solution_by_name(unique_name)
    }

    fn solutions_containing(&self, object_id: Uuid) -> StoreResult<Vec<SolutionRef>> {
        (**self).solutions_containing(object_id)
    }

    fn solution_components(&self, solution_id: Uuid) -> StoreResult<Vec<SolutionComponent>> {
        (**self).solution_components(solution_id)
    }

    fn find_solution_component(
        &self,
        object_id: Uuid,
        solution_id: Uuid,
    ) -> StoreResult<Option<SolutionComponent>> {
        (**self).find_solution_component(object_id, solution_id)
    }

    fn delete(&self, kind: ComponentKind, id: Uuid) -> StoreResult<()> {
        (**self).delete(kind, id)
    }

    fn delete_structural_type(&self, logical_name: &str) -> StoreResult<()> {
        (**self).delete_structural_type(logical_name)
    }

    fn delete_relationship(&self, schema_name: &str) -> StoreResult<()> {
        (**self).delete_relationship(schema_name)
    }

    fn delete_option_set(&self, name: &str) -> StoreResult<()> {
        (**self).delete_option_set(name)
    }

    fn set_state(&self, kind: ComponentKind, id: Uuid, change: StateChange) -> StoreResult<()> {
        (**self).set_state(kind, id, change)
    }

    fn update_record(
        &self,
        kind: ComponentKind,
        id: Uuid,
        attributes: Map<String, Value>,
    ) -> StoreResult<()> {
        (**self).update_record(kind, id, attributes)
    }

    fn add_component_to_solution(&self, request: &AddToSolution) -> StoreResult<()> {
        (**self).add_component_to_solution(request)
    }

    fn remove_component_from_solution(
        &self,
        component: &ComponentRef,
        solution_unique_name: &str,
    ) -> StoreResult<()> {
        (**self).remove_component_from_solution(component, solution_unique_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinguishable() {
        assert!(StoreError::not_found("Workflow 1").is_not_found());
        let fault = StoreError::Fault {
            operation: "delete".to_string(),
            details: "timeout".to_string(),
        };
        assert!(!fault.is_not_found());
        assert_eq!(fault.to_string(), "Store fault during delete: timeout");
    }
}
