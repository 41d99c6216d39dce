use super::dependency_queries::DependencyQueries;
use super::descriptor_resolver::ComponentDescriptorResolver;
use crate::component_cleanup::domain::{
    ComponentForDelete, ComponentRef, DependencyEdge, DependencyRecord, Direction,
    SolutionComponent,
};
use crate::ports::outbound::{ComponentStore, OperationLogger};
use crate::shared::Result;
use std::collections::HashSet;
use uuid::Uuid;

/// Controls how far a dependents/requirements walk descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkOptions {
    pub recursive: bool,
    /// Edges at depth `d` are only followed while `d <= max_depth`.
    /// `None` means unbounded.
    pub max_depth: Option<usize>,
}

impl WalkOptions {
    pub fn direct() -> Self {
        Self::default()
    }

    pub fn recursive(max_depth: Option<usize>) -> Self {
        Self {
            recursive: true,
            max_depth,
        }
    }

    fn descends_from(&self, depth: usize) -> bool {
        self.recursive && self.max_depth.map_or(true, |max| depth <= max)
    }
}

/// Lazy traversal of the component dependency graph.
///
/// Each walk owns its visited set, so independent walks may run against
/// the same walker. Walks stop at the first store fault: the fault is
/// yielded once and the iterator is fused afterwards.
pub struct DependencyWalker<S, L> {
    store: S,
    logger: L,
}

impl<S: ComponentStore, L: OperationLogger> DependencyWalker<S, L> {
    pub fn new(store: S, logger: L) -> Self {
        Self { store, logger }
    }

    /// Everything that has to go when `root` is deleted, root first.
    pub fn walk_for_delete(&self, root: ComponentRef) -> DeletePlanWalk<'_, S, L> {
        DeletePlanWalk::new(self, root, None)
    }

    /// Same as [`Self::walk_for_delete`] for a component addressed through
    /// its solution membership row.
    pub fn walk_solution_component_for_delete(
        &self,
        root: &SolutionComponent,
    ) -> DeletePlanWalk<'_, S, L> {
        DeletePlanWalk::new(self, root.component(), Some(root.id))
    }

    pub fn walk_dependents(
        &self,
        root: ComponentRef,
        options: WalkOptions,
    ) -> DependencyEdgeWalk<'_, S, L> {
        DependencyEdgeWalk::new(self, root, Direction::Dependents, options)
    }

    pub fn walk_requirements(
        &self,
        root: ComponentRef,
        options: WalkOptions,
    ) -> DependencyEdgeWalk<'_, S, L> {
        DependencyEdgeWalk::new(self, root, Direction::Requirements, options)
    }

    fn queries(&self) -> DependencyQueries<&S, &L> {
        DependencyQueries::new(&self.store, &self.logger)
    }

    fn resolver(&self) -> ComponentDescriptorResolver<&S> {
        ComponentDescriptorResolver::new(&self.store)
    }
}

struct PlanFrame {
    component: ComponentRef,
    solution_component_id: Option<Uuid>,
    depth: usize,
    parent: Option<ComponentRef>,
}

/// Pre-order walk over the components blocking a delete.
///
/// Every component reached is yielded, at the depth and parent it was
/// reached through. Its blockers are only expanded the first time, so a
/// component on a cycle shows up once more and the walk stops there.
///
/// A component's blockers are only queried once the caller asks for the
/// item after it, so a consumer that stops early issues no further queries.
pub struct DeletePlanWalk<'w, S, L> {
    walker: &'w DependencyWalker<S, L>,
    stack: Vec<PlanFrame>,
    pending_expansion: Option<PlanFrame>,
    visited: HashSet<ComponentRef>,
    failed: bool,
}

impl<'w, S: ComponentStore, L: OperationLogger> DeletePlanWalk<'w, S, L> {
    fn new(
        walker: &'w DependencyWalker<S, L>,
        root: ComponentRef,
        solution_component_id: Option<Uuid>,
    ) -> Self {
        Self {
            walker,
            stack: vec![PlanFrame {
                component: root,
                solution_component_id,
                depth: 0,
                parent: None,
            }],
            pending_expansion: None,
            visited: HashSet::new(),
            failed: false,
        }
    }

    fn expand(&mut self, frame: &PlanFrame) -> Result<()> {
        let records = self.walker.queries().required_for_delete(&frame.component)?;

        let mut children = Vec::with_capacity(records.len());
        for record in records {
            match self.blocking_solution_component(&record)? {
                Some(solution_component) => children.push(PlanFrame {
                    component: solution_component.component(),
                    solution_component_id: Some(solution_component.id),
                    depth: frame.depth + 1,
                    parent: Some(frame.component),
                }),
                None => self.walker.logger.verbose(&format!(
                    "{} has no membership row in its base solution {}",
                    record.dependent, record.dependent_base_solution_id
                )),
            }
        }

        // popped in query order
        self.stack.extend(children.into_iter().rev());
        Ok(())
    }

    fn blocking_solution_component(
        &self,
        record: &DependencyRecord,
    ) -> Result<Option<SolutionComponent>> {
        match self
            .walker
            .store
            .find_solution_component(record.dependent.id, record.dependent_base_solution_id)
        {
            Ok(found) => Ok(found),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn fail(&mut self, err: anyhow::Error) -> Option<Result<ComponentForDelete>> {
        self.failed = true;
        self.stack.clear();
        Some(Err(err))
    }
}

impl<S: ComponentStore, L: OperationLogger> Iterator for DeletePlanWalk<'_, S, L> {
    type Item = Result<ComponentForDelete>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Some(frame) = self.pending_expansion.take() {
            if let Err(err) = self.expand(&frame) {
                return self.fail(err);
            }
        }

        let frame = self.stack.pop()?;
        let descriptor = match self.walker.resolver().resolve(frame.component) {
            Ok(descriptor) => descriptor,
            Err(err) => return self.fail(err),
        };
        let item = ComponentForDelete {
            descriptor,
            solution_component_id: frame.solution_component_id,
            depth: frame.depth,
            parent: frame.parent,
        };
        // a revisited component is listed again but not expanded
        if self.visited.insert(frame.component) {
            self.pending_expansion = Some(frame);
        }
        Some(Ok(item))
    }
}

struct EdgeFrame {
    record: DependencyRecord,
    depth: usize,
}

/// Depth-first walk over dependency edges in one direction.
///
/// Every edge reached is yielded. The walk continues through an edge's far
/// end only when that end resolved and has not been visited yet.
pub struct DependencyEdgeWalk<'w, S, L> {
    walker: &'w DependencyWalker<S, L>,
    direction: Direction,
    options: WalkOptions,
    stack: Vec<EdgeFrame>,
    pending_expansion: Option<(ComponentRef, usize)>,
    visited: HashSet<ComponentRef>,
    failed: bool,
}

impl<'w, S: ComponentStore, L: OperationLogger> DependencyEdgeWalk<'w, S, L> {
    fn new(
        walker: &'w DependencyWalker<S, L>,
        root: ComponentRef,
        direction: Direction,
        options: WalkOptions,
    ) -> Self {
        Self {
            walker,
            direction,
            options,
            stack: Vec::new(),
            pending_expansion: Some((root, 0)),
            visited: HashSet::from([root]),
            failed: false,
        }
    }

    fn expand(&mut self, component: ComponentRef, depth: usize) -> Result<()> {
        let records = self.walker.queries().query(self.direction, &component)?;
        self.stack.extend(
            records
                .into_iter()
                .rev()
                .map(|record| EdgeFrame {
                    record,
                    depth: depth + 1,
                }),
        );
        Ok(())
    }

    fn warn_dangling(&self, edge: &DependencyEdge) {
        for (role, descriptor) in [("dependent", &edge.dependent), ("required", &edge.required)] {
            if !descriptor.is_resolved() {
                self.walker.logger.warning(&format!(
                    "{} found as a {} component of dependency {}, but it is not retrievable",
                    descriptor.component, role, edge.dependency_id
                ));
            }
        }
    }

    fn fail(&mut self, err: anyhow::Error) -> Option<Result<DependencyEdge>> {
        self.failed = true;
        self.stack.clear();
        Some(Err(err))
    }
}

impl<S: ComponentStore, L: OperationLogger> Iterator for DependencyEdgeWalk<'_, S, L> {
    type Item = Result<DependencyEdge>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Some((component, depth)) = self.pending_expansion.take() {
            if let Err(err) = self.expand(component, depth) {
                return self.fail(err);
            }
        }

        let frame = self.stack.pop()?;
        let edge = match self.walker.resolver().resolve_edge(&frame.record) {
            Ok(edge) => edge,
            Err(err) => return self.fail(err),
        };
        self.warn_dangling(&edge);

        let far_end = frame.record.far_end(self.direction);
        if self.options.descends_from(frame.depth)
            && edge.far_end(self.direction).is_resolved()
            && self.visited.insert(far_end)
        {
            self.pending_expansion = Some((far_end, frame.depth));
        }

        Some(Ok(edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::snapshot::{InMemoryComponentStore, Snapshot};
    use crate::component_cleanup::domain::{ComponentKind, DependencyKind, EntityRecord};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingLogger {
        warnings: Mutex<Vec<String>>,
    }

    impl OperationLogger for CapturingLogger {
        fn verbose(&self, _message: &str) {}
        fn information(&self, _message: &str) {}
        fn warning(&self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_string());
        }
        fn error(&self, _message: &str) {}
    }

    fn workflow(snapshot: &mut Snapshot, name: &str) -> ComponentRef {
        let id = Uuid::new_v4();
        snapshot
            .records
            .push(EntityRecord::new("workflow", id).with_attribute("name", name));
        ComponentRef::new(ComponentKind::Workflow, id)
    }

    fn depends(snapshot: &mut Snapshot, dependent: ComponentRef, required: ComponentRef) {
        snapshot.dependencies.push(DependencyRecord {
            dependency_id: Uuid::new_v4(),
            kind: DependencyKind::Published,
            dependent,
            dependent_base_solution_id: Uuid::nil(),
            required,
            required_base_solution_id: Uuid::nil(),
        });
    }

    #[test]
    fn test_walk_options_depth_bound() {
        let options = WalkOptions::recursive(Some(2));
        assert!(options.descends_from(1));
        assert!(options.descends_from(2));
        assert!(!options.descends_from(3));
        assert!(!WalkOptions::direct().descends_from(1));
        assert!(WalkOptions::recursive(None).descends_from(1000));
    }

    #[test]
    fn test_direct_dependents_are_not_followed() {
        let mut snapshot = Snapshot::default();
        let a = workflow(&mut snapshot, "A");
        let b = workflow(&mut snapshot, "B");
        let c = workflow(&mut snapshot, "C");
        depends(&mut snapshot, b, a);
        depends(&mut snapshot, c, b);
        let store = InMemoryComponentStore::new(snapshot);
        let logger = CapturingLogger::default();
        let walker = DependencyWalker::new(&store, &logger);

        let edges: Vec<_> = walker
            .walk_dependents(a, WalkOptions::direct())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].dependent.component, b);
    }

    #[test]
    fn test_max_depth_limits_recursion() {
        let mut snapshot = Snapshot::default();
        let a = workflow(&mut snapshot, "A");
        let b = workflow(&mut snapshot, "B");
        let c = workflow(&mut snapshot, "C");
        let d = workflow(&mut snapshot, "D");
        depends(&mut snapshot, b, a);
        depends(&mut snapshot, c, b);
        depends(&mut snapshot, d, c);
        let store = InMemoryComponentStore::new(snapshot);
        let logger = CapturingLogger::default();
        let walker = DependencyWalker::new(&store, &logger);

        let edges: Vec<_> = walker
            .walk_dependents(a, WalkOptions::recursive(Some(1)))
            .collect::<Result<_>>()
            .unwrap();

        let dependents: Vec<_> = edges.iter().map(|e| e.dependent.component).collect();
        assert_eq!(dependents, vec![b, c]);
    }

    #[test]
    fn test_requirements_walk_follows_required_end() {
        let mut snapshot = Snapshot::default();
        let a = workflow(&mut snapshot, "A");
        let b = workflow(&mut snapshot, "B");
        let c = workflow(&mut snapshot, "C");
        depends(&mut snapshot, a, b);
        depends(&mut snapshot, b, c);
        let store = InMemoryComponentStore::new(snapshot);
        let logger = CapturingLogger::default();
        let walker = DependencyWalker::new(&store, &logger);

        let required: Vec<_> = walker
            .walk_requirements(a, WalkOptions::recursive(None))
            .map(|edge| edge.map(|e| e.required.component))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(required, vec![b, c]);
    }

    #[test]
    fn test_dangling_edge_is_yielded_with_warning() {
        let mut snapshot = Snapshot::default();
        let a = workflow(&mut snapshot, "A");
        let ghost = ComponentRef::new(ComponentKind::Workflow, Uuid::new_v4());
        depends(&mut snapshot, ghost, a);
        let store = InMemoryComponentStore::new(snapshot);
        let logger = CapturingLogger::default();
        let walker = DependencyWalker::new(&store, &logger);

        let edges: Vec<_> = walker
            .walk_dependents(a, WalkOptions::recursive(None))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(edges.len(), 1);
        assert!(!edges[0].dependent.is_resolved());
        let warnings = logger.warnings.lock().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("dependent component"));
    }

    #[test]
    fn test_walk_is_lazy() {
        let mut snapshot = Snapshot::default();
        let a = workflow(&mut snapshot, "A");
        let b = workflow(&mut snapshot, "B");
        depends(&mut snapshot, b, a);
        let store = InMemoryComponentStore::new(snapshot);
        let logger = CapturingLogger::default();
        let walker = DependencyWalker::new(&store, &logger);

        let mut walk = walker.walk_for_delete(a);
        let first = walk.next().unwrap().unwrap();

        assert_eq!(first.descriptor.component, a);
        assert_eq!(first.depth, 0);
        assert!(walk.pending_expansion.is_some());
        assert!(walk.stack.is_empty());
    }
}
