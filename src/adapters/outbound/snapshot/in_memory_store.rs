use super::snapshot_file::Snapshot;
use crate::component_cleanup::domain::{
    ComponentKind, ComponentRef, DependencyRecord, EntityRecord, MetadataKind, SchemaMetadata,
    SolutionComponent, SolutionRef,
};
use crate::ports::outbound::{AddToSolution, ComponentStore, StateChange, StoreError, StoreResult};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// ComponentStore served from an exported [`Snapshot`].
///
/// Behaves like the platform for everything this crate relies on: lookups
/// of objects that do not exist fail with `NotFound`, and a component that
/// is still required by others cannot be deleted. Every mutation is
/// appended to a journal.
pub struct InMemoryComponentStore {
    state: Mutex<Snapshot>,
    journal: Mutex<Vec<String>>,
    fetches: AtomicUsize,
}

impl InMemoryComponentStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            state: Mutex::new(snapshot),
            journal: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Current state, including every mutation applied so far
    pub fn snapshot(&self) -> Snapshot {
        self.state().clone()
    }

    /// Mutations applied so far, oldest first
    pub fn journal(&self) -> Vec<String> {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of record, solution and membership lookups served (for testing/monitoring)
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn state(&self) -> MutexGuard<'_, Snapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, entry: String) {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    fn count_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::SeqCst);
    }

    fn metadata_by_name(
        state: &Snapshot,
        kind: MetadataKind,
        name: &str,
    ) -> StoreResult<SchemaMetadata> {
        state
            .metadata
            .iter()
            .find(|m| m.kind == kind && m.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("{:?} {}", kind, name)))
    }

    fn solution_by_name(state: &Snapshot, unique_name: &str) -> StoreResult<SolutionRef> {
        state
            .solutions
            .iter()
            .find(|s| s.unique_name.eq_ignore_ascii_case(unique_name))
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("Solution {}", unique_name)))
    }

    /// Whether the snapshot knows `component` at all
    fn exists(state: &Snapshot, component: &ComponentRef) -> bool {
        if let Some(kind) = component.kind.metadata_kind() {
            return state
                .metadata
                .iter()
                .any(|m| m.kind == kind && m.metadata_id == component.id);
        }
        if let Some(binding) = component.kind.record_binding() {
            return state
                .records
                .iter()
                .any(|r| r.id == component.id && r.entity == binding.entity);
        }
        state
            .solution_components
            .iter()
            .any(|sc| sc.object_id == component.id)
            || state
                .dependencies
                .iter()
                .any(|d| d.dependent == *component || d.required == *component)
    }

    fn ensure_exists(state: &Snapshot, component: &ComponentRef) -> StoreResult<()> {
        if Self::exists(state, component) {
            Ok(())
        } else {
            Err(StoreError::not_found(component.to_string()))
        }
    }

    fn blockers(state: &Snapshot, component: &ComponentRef) -> Vec<DependencyRecord> {
        state
            .dependencies
            .iter()
            .filter(|d| d.required == *component && d.kind.blocks_delete())
            .cloned()
            .collect()
    }

    /// Removes `component` with its dependency and membership rows, refusing
    /// while anything still blocks it.
    fn remove_component(state: &mut Snapshot, component: &ComponentRef) -> StoreResult<()> {
        if let Some(blocker) = Self::blockers(state, component).first() {
            return Err(StoreError::Rejected {
                operation: format!("delete {}", component),
                reason: format!("it is still required by {}", blocker.dependent),
            });
        }

        match component.kind.metadata_kind() {
            Some(kind) => state
                .metadata
                .retain(|m| !(m.kind == kind && m.metadata_id == component.id)),
            None => state.records.retain(|r| r.id != component.id),
        }
        state
            .dependencies
            .retain(|d| d.dependent != *component && d.required != *component);
        state
            .solution_components
            .retain(|sc| sc.object_id != component.id);
        Ok(())
    }

    fn delete_by_name(
        &self,
        kind: MetadataKind,
        component_kind: ComponentKind,
        name: &str,
    ) -> StoreResult<()> {
        let mut state = self.state();
        let metadata = Self::metadata_by_name(&state, kind, name)?;
        let component = ComponentRef::new(component_kind, metadata.metadata_id);
        Self::remove_component(&mut state, &component)?;
        if kind == MetadataKind::Entity {
            state.metadata.retain(|m| {
                !(m.kind == MetadataKind::Attribute
                    && m
                        .entity_logical_name
                        .as_deref()
                        .is_some_and(|entity| entity.eq_ignore_ascii_case(name)))
            });
        }
        Ok(())
    }

    fn record_mut<'s>(
        state: &'s mut Snapshot,
        kind: ComponentKind,
        id: Uuid,
    ) -> StoreResult<&'s mut EntityRecord> {
        let entity = kind.record_binding().map(|binding| binding.entity);
        state
            .records
            .iter_mut()
            .find(|r| r.id == id && Some(r.entity.as_str()) == entity)
            .ok_or_else(|| StoreError::not_found(ComponentRef::new(kind, id).to_string()))
    }
}

impl ComponentStore for InMemoryComponentStore {
    fn required_for_delete(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>> {
        let state = self.state();
        Self::ensure_exists(&state, component)?;
        Ok(Self::blockers(&state, component))
    }

    fn dependents_of(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>> {
        let state = self.state();
        Self::ensure_exists(&state, component)?;
        Ok(state
            .dependencies
            .iter()
            .filter(|d| d.required == *component)
            .cloned()
            .collect())
    }

    fn requirements_of(&self, component: &ComponentRef) -> StoreResult<Vec<DependencyRecord>> {
        let state = self.state();
        Self::ensure_exists(&state, component)?;
        Ok(state
            .dependencies
            .iter()
            .filter(|d| d.dependent == *component)
            .cloned()
            .collect())
    }

    fn fetch_record(
        &self,
        kind: ComponentKind,
        id: Uuid,
        projection: &[&str],
    ) -> StoreResult<EntityRecord> {
        self.count_fetch();
        let mut state = self.state();
        let record = Self::record_mut(&mut state, kind, id)?;
        Ok(record.project(projection))
    }

    fn fetch_metadata(&self, kind: MetadataKind, metadata_id: Uuid) -> StoreResult<SchemaMetadata> {
        self.state()
            .metadata
            .iter()
            .find(|m| m.kind == kind && m.metadata_id == metadata_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("{:?} {}", kind, metadata_id)))
    }

    fn fetch_metadata_by_name(&self, kind: MetadataKind, name: &str) -> StoreResult<SchemaMetadata> {
        Self::metadata_by_name(&self.state(), kind, name)
    }

    fn fetch_solution(&self, solution_id: Uuid) -> StoreResult<SolutionRef> {
        self.count_fetch();
        self.state()
            .solutions
            .iter()
            .find(|s| s.id == solution_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("Solution {}", solution_id)))
    }

    fn find_solution_by_name(&self, unique_name: &str) -> StoreResult<Option<SolutionRef>> {
        match Self::solution_by_name(&self.state(), unique_name) {
            Ok(solution) => Ok(Some(solution)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn solutions_containing(&self, object_id: Uuid) -> StoreResult<Vec<SolutionRef>> {
        self.count_fetch();
        let state = self.state();
        let mut solutions: Vec<SolutionRef> = Vec::new();
        for row in state.solution_components.iter().filter(|sc| sc.object_id == object_id) {
            if let Some(solution) = state.solutions.iter().find(|s| s.id == row.solution_id) {
                if !solutions.contains(solution) {
                    solutions.push(solution.clone());
                }
            }
        }
        Ok(solutions)
    }

    fn solution_components(&self, solution_id: Uuid) -> StoreResult<Vec<SolutionComponent>> {
        let state = self.state();
        if !state.solutions.iter().any(|s| s.id == solution_id) {
            return Err(StoreError::not_found(format!("Solution {}", solution_id)));
        }
        Ok(state
            .solution_components
            .iter()
            .filter(|sc| sc.solution_id == solution_id)
            .cloned()
            .collect())
    }

    fn find_solution_component(
        &self,
        object_id: Uuid,
        solution_id: Uuid,
    ) -> StoreResult<Option<SolutionComponent>> {
        Ok(self
            .state()
            .solution_components
            .iter()
            .find(|sc| sc.object_id == object_id && sc.solution_id == solution_id)
            .cloned())
    }

    fn delete(&self, kind: ComponentKind, id: Uuid) -> StoreResult<()> {
        let component = ComponentRef::new(kind, id);
        let mut state = self.state();
        Self::ensure_exists(&state, &component)?;
        Self::remove_component(&mut state, &component)?;
        drop(state);
        self.record(format!("delete {}", component));
        Ok(())
    }

    fn delete_structural_type(&self, logical_name: &str) -> StoreResult<()> {
        self.delete_by_name(MetadataKind::Entity, ComponentKind::Entity, logical_name)?;
        self.record(format!("delete_structural_type {}", logical_name));
        Ok(())
    }

    fn delete_relationship(&self, schema_name: &str) -> StoreResult<()> {
        self.delete_by_name(
            MetadataKind::Relationship,
            ComponentKind::EntityRelationship,
            schema_name,
        )?;
        self.record(format!("delete_relationship {}", schema_name));
        Ok(())
    }

    fn delete_option_set(&self, name: &str) -> StoreResult<()> {
        self.delete_by_name(MetadataKind::OptionSet, ComponentKind::OptionSet, name)?;
        self.record(format!("delete_option_set {}", name));
        Ok(())
    }

    fn set_state(&self, kind: ComponentKind, id: Uuid, change: StateChange) -> StoreResult<()> {
        let mut state = self.state();
        let record = Self::record_mut(&mut state, kind, id)?;
        record
            .attributes
            .insert("statecode".to_string(), Value::from(change.state));
        record
            .attributes
            .insert("statuscode".to_string(), Value::from(change.status));
        drop(state);
        self.record(format!(
            "set_state {} state={} status={}",
            ComponentRef::new(kind, id),
            change.state,
            change.status
        ));
        Ok(())
    }

    fn update_record(
        &self,
        kind: ComponentKind,
        id: Uuid,
        attributes: Map<String, Value>,
    ) -> StoreResult<()> {
        let names: Vec<String> = attributes.keys().cloned().collect();
        let mut state = self.state();
        let record = Self::record_mut(&mut state, kind, id)?;
        record.attributes.extend(attributes);
        drop(state);
        self.record(format!(
            "update_record {} {}",
            ComponentRef::new(kind, id),
            names.join(",")
        ));
        Ok(())
    }

    fn add_component_to_solution(&self, request: &AddToSolution) -> StoreResult<()> {
        let mut state = self.state();
        let solution = Self::solution_by_name(&state, &request.solution_unique_name)?;
        let already_member = state
            .solution_components
            .iter()
            .any(|sc| sc.object_id == request.component.id && sc.solution_id == solution.id);
        if !already_member {
            state.solution_components.push(SolutionComponent {
                id: Uuid::new_v4(),
                solution_id: solution.id,
                object_id: request.component.id,
                kind: request.component.kind,
                root_solution_component_id: None,
            });
        }
        drop(state);
        self.record(format!(
            "add_component_to_solution {} {} exclude_subcomponents={}",
            request.component, solution.unique_name, request.exclude_subcomponents
        ));
        Ok(())
    }

    fn remove_component_from_solution(
        &self,
        component: &ComponentRef,
        solution_unique_name: &str,
    ) -> StoreResult<()> {
        let mut state = self.state();
        let solution = Self::solution_by_name(&state, solution_unique_name)?;
        let row_id = state
            .solution_components
            .iter()
            .find(|sc| sc.object_id == component.id && sc.solution_id == solution.id)
            .map(|sc| sc.id)
            .ok_or_else(|| {
                StoreError::not_found(format!("{} in solution {}", component, solution.unique_name))
            })?;
        state
            .solution_components
            .retain(|sc| sc.id != row_id && sc.root_solution_component_id != Some(row_id));
        drop(state);
        self.record(format!(
            "remove_component_from_solution {} {}",
            component, solution.unique_name
        ));
        Ok(())
    }
}
