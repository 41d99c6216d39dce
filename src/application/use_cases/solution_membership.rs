use crate::adapters::outbound::caching::CachingComponentStore;
use crate::component_cleanup::domain::{ComponentRef, SolutionComponent, SolutionRef};
use crate::component_cleanup::services::ComponentDescriptorResolver;
use crate::ports::inbound::{RemoveFromSolutionRequest, SolutionListing};
use crate::ports::outbound::{AddToSolution, ComponentStore, OperationLogger};
use crate::shared::error::PrunerError;
use crate::shared::Result;
use std::cmp::Reverse;

/// SolutionMembershipUseCase - adds, removes and lists solution components
pub struct SolutionMembershipUseCase<S, L> {
    store: S,
    logger: L,
}

impl<S: ComponentStore, L: OperationLogger> SolutionMembershipUseCase<S, L> {
    pub fn new(store: S, logger: L) -> Self {
        Self { store, logger }
    }

    /// Adds `component` to a solution unless it is already there.
    ///
    /// Structural components are added without their sub-components.
    pub fn add(&self, component: ComponentRef, solution_unique_name: &str) -> Result<bool> {
        if solution_unique_name.trim().is_empty() {
            self.logger
                .verbose(&format!("No solution given for {}, nothing to add", component));
            return Ok(false);
        }

        let solution = self.solution(solution_unique_name)?;
        if self
            .store
            .find_solution_component(component.id, solution.id)?
            .is_some()
        {
            self.logger.verbose(&format!(
                "{} is already part of solution {}",
                component, solution.unique_name
            ));
            return Ok(false);
        }

        let request = AddToSolution {
            component,
            solution_unique_name: solution.unique_name.clone(),
            exclude_subcomponents: component.kind.is_structural(),
        };
        if request.exclude_subcomponents {
            self.logger
                .verbose(&format!("Adding {} without its sub-components", component));
        }
        self.store.add_component_to_solution(&request)?;
        self.logger.information(&format!(
            "Added {} to solution {}",
            component, solution.unique_name
        ));
        Ok(true)
    }

    /// Removes one component, or every root component when none is given.
    pub fn remove(&self, request: RemoveFromSolutionRequest) -> Result<Vec<ComponentRef>> {
        let solution = self.solution(&request.solution_unique_name)?;

        let targets: Vec<ComponentRef> = match request.component {
            Some(component) => {
                match self
                    .store
                    .find_solution_component(component.id, solution.id)?
                {
                    Some(row) => vec![row.component()],
                    None => {
                        self.logger.warning(&format!(
                            "Component {} not found within solution {}",
                            component, solution.unique_name
                        ));
                        Vec::new()
                    }
                }
            }
            None => {
                self.logger.verbose(&format!(
                    "Removing all root components from solution {}",
                    solution.unique_name
                ));
                self.store
                    .solution_components(solution.id)?
                    .iter()
                    .filter(|row| row.root_solution_component_id.is_none())
                    .map(SolutionComponent::component)
                    .collect()
            }
        };

        for component in &targets {
            self.store
                .remove_component_from_solution(component, &solution.unique_name)?;
            self.logger.information(&format!(
                "Removed {} from solution {}",
                component, solution.unique_name
            ));
        }
        Ok(targets)
    }

    /// Every component of a solution, sub-components ahead of root components.
    pub fn list(&self, solution_unique_name: &str) -> Result<SolutionListing> {
        let solution = self.solution(solution_unique_name)?;
        self.logger.verbose(&format!(
            "Getting solution components from {}",
            solution.unique_name
        ));

        let mut rows = self.store.solution_components(solution.id)?;
        // sub-components carry their root's id; roots come last
        rows.sort_by_key(|row| Reverse(row.root_solution_component_id));

        let cache = CachingComponentStore::new(&self.store);
        let resolver = ComponentDescriptorResolver::new(&cache);
        let components = rows
            .iter()
            .map(|row| resolver.resolve(row.component()))
            .collect::<Result<Vec<_>>>()?;

        Ok(SolutionListing {
            solution,
            components,
        })
    }

    fn solution(&self, unique_name: &str) -> Result<SolutionRef> {
        self.store
            .find_solution_by_name(unique_name)?
            .ok_or_else(|| {
                PrunerError::SolutionNotFound {
                    unique_name: unique_name.to_string(),
                }
                .into()
            })
    }
}
