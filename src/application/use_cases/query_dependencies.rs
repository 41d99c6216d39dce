use crate::adapters::outbound::caching::CachingComponentStore;
use crate::component_cleanup::domain::{DependencyEdge, Direction};
use crate::component_cleanup::services::DependencyWalker;
use crate::ports::inbound::DependencyRequest;
use crate::ports::outbound::{ComponentStore, OperationLogger};
use crate::shared::Result;

/// QueryDependenciesUseCase - lists dependents or requirements of a component
pub struct QueryDependenciesUseCase<S, L> {
    store: S,
    logger: L,
}

impl<S: ComponentStore, L: OperationLogger> QueryDependenciesUseCase<S, L> {
    pub fn new(store: S, logger: L) -> Self {
        Self { store, logger }
    }

    pub fn execute(
        &self,
        request: DependencyRequest,
        direction: Direction,
    ) -> Result<Vec<DependencyEdge>> {
        let label = match direction {
            Direction::Dependents => "dependent",
            Direction::Requirements => "required",
        };
        self.logger.verbose(&format!(
            "Retrieving {} components of {} (recursive: {}, max depth: {})",
            label,
            request.component,
            request.recursive,
            request
                .max_depth
                .map_or_else(|| "unbounded".to_string(), |depth| depth.to_string())
        ));

        let cache = CachingComponentStore::new(&self.store);
        let walker = DependencyWalker::new(&cache, &self.logger);
        let options = request.walk_options();
        match direction {
            Direction::Dependents => walker.walk_dependents(request.component, options).collect(),
            Direction::Requirements => walker
                .walk_requirements(request.component, options)
                .collect(),
        }
    }
}
