use serde_json::{Map, Value};
use solution_pruner::component_cleanup::domain::{
    DependencyRecord, EntityRecord, MetadataKind, SchemaMetadata, SolutionComponent,
};
use solution_pruner::ports::outbound::{AddToSolution, StateChange, StoreResult};
use solution_pruner::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

/// Mock ComponentStore wrapping an in-memory snapshot store that can be
/// told to fail deletes of selected components with a store fault
pub struct MockComponentStore {
    pub inner: InMemoryComponentStore,
    pub failing_deletes: HashSet<Uuid>,
}

impl MockComponentStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: InMemoryComponentStore::new(snapshot),
            failing_deletes: HashSet::new(),
        }
    }

    pub fn with_failing_delete(mut self, id: Uuid) -> Self {
        self.failing_deletes.insert(id);
        self
    }
}

impl ComponentStore for MockComponentStore {
    fn required_for_delete(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>> {
        self.inner.required_for_delete(component)
    }

    fn dependents_of(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>> {
        self.inner.dependents_of(component)
    }

    fn requirements_of(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>> {
        self.inner.requirements_of(component)
    }

    fn fetch_record(
        &self,
        kind: ComponentKind,
        id: Uuid,
        projection: &[&str],
    ) -> StoreResult<EntityRecord> {
        self.inner.fetch_record(kind, id, projection)
    }

    fn fetch_metadata(&self, kind: MetadataKind, metadata_id: Uuid) -> StoreResult<SchemaMetadata> {
        self.inner.fetch_metadata(kind, metadata_id)
    }

    fn fetch_metadata_by_name(&self, kind: MetadataKind, name: &str) -> StoreResult<SchemaMetadata> {
        self.inner.fetch_metadata_by_name(kind, name)
    }

    fn fetch_solution(&self, solution_id: Uuid) -> StoreResult<SolutionRef> {
        self.inner.fetch_solution(solution_id)
    }

    fn find_solution_by_name(&self, unique_name: &str) -> StoreResult<Option<SolutionRef>> {
        self.inner.find_solution_by_name(unique_name)
    }

    fn solutions_containing(&self, object_id: Uuid) -> StoreResult<Vec<SolutionRef>> {
        self.inner.solutions_containing(object_id)
    }

    fn solution_components(&self, solution_id: Uuid) -> StoreResult<Vec<SolutionComponent>> {
        self.inner.solution_components(solution_id)
    }

    fn find_solution_component(
        &self,
        object_id: Uuid,
        solution_id: Uuid,
    ) -> StoreResult<Option<SolutionComponent>> {
        self.inner.find_solution_component(object_id, solution_id)
    }

    fn delete(&self, kind: ComponentKind, id: Uuid) -> StoreResult<()> {
        if self.failing_deletes.contains(&id) {
            return Err(StoreError::Fault {
                operation: format!("delete {} {}", kind, id),
                details: "mock store fault".to_string(),
            });
        }
        self.inner.delete(kind, id)
    }

    fn delete_structural_type(&self, logical_name: &str) -> StoreResult<()> {
        self.inner.delete_structural_type(logical_name)
    }

    fn delete_relationship(&self, schema_name: &str) -> StoreResult<()> {
        self.inner.delete_relationship(schema_name)
    }

    fn delete_option_set(&self, name: &str) -> StoreResult<()> {
        self.inner.delete_option_set(name)
    }

    fn set_state(&self, kind: ComponentKind, id: Uuid, change: StateChange) -> StoreResult<()> {
        self.inner.set_state(kind, id, change)
    }

    fn update_record(
        &self,
        kind: ComponentKind,
        id: Uuid,
        attributes: Map<String, Value>,
    ) -> StoreResult<()> {
        self.inner.update_record(kind, id, attributes)
    }

    fn add_component_to_solution(&self, request: &AddToSolution) -> StoreResult<()> {
        self.inner.add_component_to_solution(request)
    }

    fn remove_component_from_solution(
        &self,
        component: &ComponentRef,
        solution_unique_name: &str,
    ) -> StoreResult<()> {
        self.inner
            .remove_component_from_solution(component, solution_unique_name)
    }
}
