use crate::adapters::outbound::caching::CachingComponentStore;
use crate::component_cleanup::domain::{ComponentForDelete, ComponentRef};
use crate::component_cleanup::services::DependencyWalker;
use crate::ports::outbound::{ComponentStore, OperationLogger};
use crate::shared::error::PrunerError;
use crate::shared::Result;

/// PlanDeletionUseCase - lists what has to go when a component is deleted
///
/// Read-only: the store is never mutated. Lookups are served through a
/// cache that lives for one execution.
pub struct PlanDeletionUseCase<S, L> {
    store: S,
    logger: L,
}

impl<S: ComponentStore, L: OperationLogger> PlanDeletionUseCase<S, L> {
    pub fn new(store: S, logger: L) -> Self {
        Self { store, logger }
    }

    pub fn execute(&self, component: ComponentRef) -> Result<Vec<ComponentForDelete>> {
        self.logger
            .verbose(&format!("Retrieving components for delete of {}", component));

        let cache = CachingComponentStore::new(&self.store);
        let walker = DependencyWalker::new(&cache, &self.logger);
        self.collect(component, walker.walk_for_delete(component))
    }

    /// Plans from the component's membership row in one solution, so the
    /// root item carries its solution component id as well.
    ///
    /// # Errors
    /// [`PrunerError::SolutionNotFound`] for an unknown solution and
    /// [`PrunerError::ComponentNotInSolution`] when the component is not
    /// part of it.
    pub fn execute_in_solution(
        &self,
        component: ComponentRef,
        solution_unique_name: &str,
    ) -> Result<Vec<ComponentForDelete>> {
        let solution = self
            .store
            .find_solution_by_name(solution_unique_name)?
            .ok_or_else(|| PrunerError::SolutionNotFound {
                unique_name: solution_unique_name.to_string(),
            })?;
        let row = self
            .store
            .find_solution_component(component.id, solution.id)?
            .ok_or_else(|| PrunerError::ComponentNotInSolution {
                component,
                unique_name: solution.unique_name.clone(),
            })?;
        self.logger.verbose(&format!(
            "Retrieving components for delete of {} from solution {}",
            component, solution.unique_name
        ));

        let cache = CachingComponentStore::new(&self.store);
        let walker = DependencyWalker::new(&cache, &self.logger);
        self.collect(component, walker.walk_solution_component_for_delete(&row))
    }

    fn collect(
        &self,
        component: ComponentRef,
        walk: impl Iterator<Item = Result<ComponentForDelete>>,
    ) -> Result<Vec<ComponentForDelete>> {
        let plan = walk.collect::<Result<Vec<_>>>()?;
        self.logger.information(&format!(
            "{} component(s) have to be deleted with {}",
            plan.len(),
            component
        ));
        Ok(plan)
    }
}
