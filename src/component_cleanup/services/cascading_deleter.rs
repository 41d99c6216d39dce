use super::dependency_queries::DependencyQueries;
use super::deletion_strategies::StrategyRegistry;
use crate::component_cleanup::domain::{
    ComponentKind, ComponentRef, DeletionOutcome, DeletionReport,
};
use crate::component_cleanup::policies::ManagedFilter;
use crate::ports::outbound::{ComponentStore, OperationLogger};
use crate::shared::error::PrunerError;
use crate::shared::Result;
use std::collections::HashSet;

/// Components already handled by a cascading delete
pub type VisitedSet = HashSet<ComponentRef>;

/// Options shared by every component touched by one cascading delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOptions {
    /// Leave managed components in place. Dependents of a managed
    /// structural component or workflow are left in place as well.
    pub unmanaged_only: bool,
    /// Describe every mutation instead of performing it
    pub what_if: bool,
}

/// Deletes a component after recursively deleting everything that blocks
/// it, dispatching the final step to a per-kind strategy.
///
/// Dependents are processed before the component they depend on, and a
/// component reached twice is only processed the first time.
pub struct CascadingDeleter<S, L> {
    store: S,
    logger: L,
    registry: StrategyRegistry<S, L>,
    options: DeleteOptions,
}

impl<S: ComponentStore, L: OperationLogger> CascadingDeleter<S, L> {
    pub fn new(store: S, logger: L, options: DeleteOptions) -> Self {
        Self::with_registry(store, logger, options, StrategyRegistry::with_defaults())
    }

    pub fn with_registry(
        store: S,
        logger: L,
        options: DeleteOptions,
        registry: StrategyRegistry<S, L>,
    ) -> Self {
        Self {
            store,
            logger,
            registry,
            options,
        }
    }

    /// Deletes `component` and everything blocking it.
    ///
    /// # Errors
    ///
    /// A store fault stops the cascade. The error is a
    /// [`PrunerError::PartialDeletion`] carrying what had already been done.
    pub fn delete_with_dependencies(&self, component: ComponentRef) -> Result<DeletionReport> {
        let mut visited = VisitedSet::new();
        self.delete_with_dependencies_in(component, &mut visited)
    }

    /// Like [`Self::delete_with_dependencies`], sharing `visited` with
    /// earlier calls so nothing is processed twice across them.
    pub fn delete_with_dependencies_in(
        &self,
        component: ComponentRef,
        visited: &mut VisitedSet,
    ) -> Result<DeletionReport> {
        let mut report = DeletionReport::new();
        match self.cascade(component, visited, &mut report) {
            Ok(()) => Ok(report),
            Err(source) => {
                self.logger.error(&format!(
                    "Cascading delete of {} stopped: {:#}",
                    component, source
                ));
                Err(PrunerError::PartialDeletion {
                    target: component,
                    report,
                    source,
                }
                .into())
            }
        }
    }

    fn cascade(
        &self,
        component: ComponentRef,
        visited: &mut VisitedSet,
        report: &mut DeletionReport,
    ) -> Result<()> {
        if !visited.insert(component) {
            return Ok(());
        }

        let filter = ManagedFilter::new(self.options.unmanaged_only);
        if filter.is_enabled() && filter.skips(self.guarded_managed_flag(&component)?) {
            self.logger.information(&format!(
                "Skipping managed {} together with its dependents",
                component
            ));
            report.record(component, DeletionOutcome::SkippedManaged);
            return Ok(());
        }

        self.logger
            .verbose(&format!("Checking dependencies for {}", component));
        let blockers = self.queries().required_for_delete(&component)?;
        for record in blockers {
            self.cascade(record.dependent, visited, report)?;
        }

        let strategy = self.registry.strategy_for(component.kind);
        let outcome = {
            let mut context = DeletionContext {
                deleter: self,
                visited: &mut *visited,
                report: &mut *report,
            };
            strategy.delete(&component, &mut context)?
        };
        self.logger.verbose(&format!("{}: {}", component, outcome));
        report.record(component, outcome);
        Ok(())
    }

    fn queries(&self) -> DependencyQueries<&S, &L> {
        DependencyQueries::new(&self.store, &self.logger)
    }

    /// Live managed flag of structural components and workflows. Other
    /// kinds are only checked by their strategy, after their blockers.
    fn guarded_managed_flag(&self, component: &ComponentRef) -> Result<Option<bool>> {
        let fetched = match component.kind.metadata_kind() {
            Some(kind) => self
                .store
                .fetch_metadata(kind, component.id)
                .map(|metadata| metadata.is_managed),
            None if component.kind == ComponentKind::Workflow => self
                .store
                .fetch_record(component.kind, component.id, &["name", "ismanaged"])
                .map(|record| record.is_managed()),
            None => return Ok(None),
        };
        match fetched {
            Ok(is_managed) => Ok(is_managed),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// What a [`super::DeletionStrategy`] may use while deleting one component.
pub struct DeletionContext<'a, S, L> {
    deleter: &'a CascadingDeleter<S, L>,
    visited: &'a mut VisitedSet,
    report: &'a mut DeletionReport,
}

impl<S: ComponentStore, L: OperationLogger> DeletionContext<'_, S, L> {
    /// Live, uncached access to the store
    pub fn store(&self) -> &S {
        &self.deleter.store
    }

    pub fn logger(&self) -> &L {
        &self.deleter.logger
    }

    pub fn managed_filter(&self) -> ManagedFilter {
        ManagedFilter::new(self.deleter.options.unmanaged_only)
    }

    /// Runs a nested cascading delete within the current one.
    pub fn cascade(&mut self, component: ComponentRef) -> Result<()> {
        self.deleter.cascade(component, self.visited, self.report)
    }

    /// Re-queries what blocks `component` and cascades into each dependent.
    pub fn clear_blockers(&mut self, component: &ComponentRef) -> Result<()> {
        let blockers = self.deleter.queries().required_for_delete(component)?;
        for record in blockers {
            self.cascade(record.dependent)?;
        }
        Ok(())
    }

    /// Returns `true` when `action` should really be performed. In what-if
    /// mode the action is only described.
    pub fn should_process(&self, action: &str) -> bool {
        if self.deleter.options.what_if {
            self.logger().information(&format!("What if: {}", action));
            return false;
        }
        true
    }

    /// Logs and returns the outcome for a managed component left in place.
    pub fn skip_managed(&self, description: &str) -> DeletionOutcome {
        self.logger()
            .information(&format!("Skipping managed {}", description));
        DeletionOutcome::SkippedManaged
    }

    /// Logs and returns the outcome for a component that no longer exists.
    pub fn missing(&self, component: &ComponentRef) -> DeletionOutcome {
        self.logger().warning(&format!(
            "{} could not be found and is skipped",
            component
        ));
        DeletionOutcome::Missing
    }
}
