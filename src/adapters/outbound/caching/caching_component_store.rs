use crate::component_cleanup::domain::{
    ComponentKind, ComponentRef, DependencyRecord, EntityRecord, MetadataKind, SchemaMetadata,
    SolutionComponent, SolutionRef,
};
use crate::ports::outbound::{AddToSolution, ComponentStore, StateChange, StoreResult};
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

/// Per-key slot. Callers racing on the same key serialize on its mutex,
/// so the value is fetched at most once.
type Slot<V> = Arc<Mutex<Option<V>>>;

struct ComputeOnceCache<K, V> {
    slots: DashMap<K, Slot<V>>,
}

impl<K: Eq + Hash, V: Clone> ComputeOnceCache<K, V> {
    fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    fn get_or_try_fetch(
        &self,
        key: K,
        fetch: impl FnOnce() -> StoreResult<V>,
    ) -> StoreResult<V> {
        let slot = Arc::clone(&self.slots.entry(key).or_default());
        let mut value = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = value.as_ref() {
            return Ok(cached.clone());
        }

        // failures leave the slot empty so the next caller retries
        let fetched = fetch()?;
        *value = Some(fetched.clone());
        Ok(fetched)
    }

    fn evict(&self, key: &K) {
        self.slots.remove(key);
    }

    fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|entry| {
                entry
                    .value()
                    .lock()
                    .map(|slot| slot.is_some())
                    .unwrap_or(false)
            })
            .count()
    }
}

/// CachingComponentStore wraps a ComponentStore and memoizes record,
/// solution and membership lookups.
///
/// Records are keyed by id alone: the projection requested by the first
/// caller is what later callers get. Dependency queries and mutations
/// always go to the inner store; a mutation evicts the record it touched.
///
/// One instance is meant to live for a single top-level operation.
pub struct CachingComponentStore<S: ComponentStore> {
    inner: S,
    records: ComputeOnceCache<Uuid, EntityRecord>,
    solutions: ComputeOnceCache<Uuid, SolutionRef>,
    containing_solutions: ComputeOnceCache<Uuid, Vec<SolutionRef>>,
}

impl<S: ComponentStore> CachingComponentStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            records: ComputeOnceCache::new(),
            solutions: ComputeOnceCache::new(),
            containing_solutions: ComputeOnceCache::new(),
        }
    }

    /// Number of cached records (for testing/monitoring)
    pub fn cached_records(&self) -> usize {
        self.records.len()
    }
}

impl<S: ComponentStore> ComponentStore for CachingComponentStore<S> {
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
        self.records
            .get_or_try_fetch(id, || self.inner.fetch_record(kind, id, projection))
    }

    fn fetch_metadata(&self, kind: MetadataKind, metadata_id: Uuid) -> StoreResult<SchemaMetadata> {
        self.inner.fetch_metadata(kind, metadata_id)
    }

    fn fetch_metadata_by_name(&self, kind: MetadataKind, name: &str) -> StoreResult<SchemaMetadata> {
        self.inner.fetch_metadata_by_name(kind, name)
    }

    fn fetch_solution(&self, solution_id: Uuid) -> StoreResult<SolutionRef> {
        self.solutions
            .get_or_try_fetch(solution_id, || self.inner.fetch_solution(solution_id))
    }

    fn find_solution_by_name(&self, unique_name: &str) -> StoreResult<Option<SolutionRef>> {
        self.inner.find_solution_by_name(unique_name)
    }

    fn solutions_containing(&self, object_id: Uuid) -> StoreResult<Vec<SolutionRef>> {
        self.containing_solutions
            .get_or_try_fetch(object_id, || self.inner.solutions_containing(object_id))
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
        self.records.evict(&id);
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
        self.records.evict(&id);
        self.inner.set_state(kind, id, change)
    }

    fn update_record(
        &self,
        kind: ComponentKind,
        id: Uuid,
        attributes: Map<String, Value>,
    ) -> StoreResult<()> {
        self.records.evict(&id);
        self.inner.update_record(kind, id, attributes)
    }

    fn add_component_to_solution(&self, request: &AddToSolution) -> StoreResult<()> {
        self.containing_solutions.evict(&request.component.id);
        self.inner.add_component_to_solution(request)
    }

    fn remove_component_from_solution(
        &self,
        component: &ComponentRef,
        solution_unique_name: &str,
    ) -> StoreResult<()> {
        self.containing_solutions.evict(&component.id);
        self.inner
            .remove_component_from_solution(component, solution_unique_name)
    }
}
