use super::{
    DeleteComponentUseCase, PlanDeletionUseCase, QueryDependenciesUseCase,
    SolutionMembershipUseCase,
};
use crate::component_cleanup::domain::{
    ComponentForDelete, ComponentRef, DeletionReport, DependencyEdge, Direction,
};
use crate::ports::inbound::{
    ComponentCleanupPort, DeleteRequest, DependencyRequest, RemoveFromSolutionRequest,
    SolutionListing,
};
use crate::ports::outbound::{ComponentStore, OperationLogger};
use crate::shared::Result;

/// ComponentCleanupService - implements the inbound port on top of the use cases
///
/// # Type Parameters
/// * `S` - ComponentStore implementation
/// * `L` - OperationLogger implementation
pub struct ComponentCleanupService<S, L> {
    store: S,
    logger: L,
}

impl<S: ComponentStore, L: OperationLogger> ComponentCleanupService<S, L> {
    pub fn new(store: S, logger: L) -> Self {
        Self { store, logger }
    }
}

impl<S: ComponentStore, L: OperationLogger> ComponentCleanupPort for ComponentCleanupService<S, L> {
    fn components_for_delete(&self, component: ComponentRef) -> Result<Vec<ComponentForDelete>> {
        PlanDeletionUseCase::new(&self.store, &self.logger).execute(component)
    }

    fn solution_component_for_delete(
        &self,
        component: ComponentRef,
        solution_unique_name: &str,
    ) -> Result<Vec<ComponentForDelete>> {
        PlanDeletionUseCase::new(&self.store, &self.logger)
            .execute_in_solution(component, solution_unique_name)
    }

    fn dependents(&self, request: DependencyRequest) -> Result<Vec<DependencyEdge>> {
        QueryDependenciesUseCase::new(&self.store, &self.logger)
            .execute(request, Direction::Dependents)
    }

    fn requirements(&self, request: DependencyRequest) -> Result<Vec<DependencyEdge>> {
        QueryDependenciesUseCase::new(&self.store, &self.logger)
            .execute(request, Direction::Requirements)
    }

    fn delete_with_dependencies(&self, request: DeleteRequest) -> Result<DeletionReport> {
        DeleteComponentUseCase::new(&self.store, &self.logger).execute(request)
    }

    fn add_to_solution(
        &self,
        component: ComponentRef,
        solution_unique_name: &str,
    ) -> Result<bool> {
        SolutionMembershipUseCase::new(&self.store, &self.logger)
            .add(component, solution_unique_name)
    }

    fn remove_from_solution(
        &self,
        request: RemoveFromSolutionRequest,
    ) -> Result<Vec<ComponentRef>> {
        SolutionMembershipUseCase::new(&self.store, &self.logger).remove(request)
    }

    fn solution_components(&self, solution_unique_name: &str) -> Result<SolutionListing> {
        SolutionMembershipUseCase::new(&self.store, &self.logger).list(solution_unique_name)
    }
}
