use crate::component_cleanup::domain::{ComponentRef, DependencyRecord, Direction};
use crate::ports::outbound::{ComponentStore, OperationLogger, StoreResult};
use crate::shared::Result;

/// Uniform access to the store's three dependency queries.
///
/// A query against an object that no longer exists yields no records and a
/// warning; every other store failure is returned to the caller.
pub struct DependencyQueries<S, L> {
    store: S,
    logger: L,
}

impl<S: ComponentStore, L: OperationLogger> DependencyQueries<S, L> {
    pub fn new(store: S, logger: L) -> Self {
        Self { store, logger }
    }

    /// Dependencies that must be cleared before `component` may be deleted
    pub fn required_for_delete(&self, component: &ComponentRef) -> Result<Vec<DependencyRecord>> {
        self.tolerate_missing(
            "dependencies for delete",
            component,
            self.store.required_for_delete(component),
        )
    }

    /// Dependencies where other components depend on `component`
    pub fn dependents_of(&self, component: &ComponentRef) -> Result<Vec<DependencyRecord>> {
        self.tolerate_missing(
            "dependent components",
            component,
            self.store.dependents_of(component),
        )
    }

    /// Dependencies where `component` depends on other components
    pub fn requirements_of(&self, component: &ComponentRef) -> Result<Vec<DependencyRecord>> {
        self.tolerate_missing(
            "required components",
            component,
            self.store.requirements_of(component),
        )
    }

    pub fn query(
        &self,
        direction: Direction,
        component: &ComponentRef,
    ) -> Result<Vec<DependencyRecord>> {
        match direction {
            Direction::Dependents => self.dependents_of(component),
            Direction::Requirements => self.requirements_of(component),
        }
    }

    fn tolerate_missing(
        &self,
        what: &str,
        component: &ComponentRef,
        result: StoreResult<Vec<DependencyRecord>>,
    ) -> Result<Vec<DependencyRecord>> {
        match result {
            Ok(records) => Ok(records),
            Err(err) if err.is_not_found() => {
                self.logger.warning(&format!(
                    "Fault when retrieving {} for component {}: {}",
                    what, component, err
                ));
                Ok(Vec::new())
            }
            Err(err) => Err(err.into()),
        }
    }
}
