use crate::component_cleanup::domain::{
    ComponentDescriptor, ComponentForDelete, ComponentRef, DeletionReport, DependencyEdge,
    SolutionRef,
};
use crate::component_cleanup::services::{DeleteOptions, WalkOptions};
use crate::shared::Result;

/// Request parameters for a dependents/requirements query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyRequest {
    pub component: ComponentRef,
    /// Keep following edges past the first level
    pub recursive: bool,
    /// Deepest edge level that is still followed when `recursive` is set
    pub max_depth: Option<usize>,
}

impl DependencyRequest {
    pub fn new(component: ComponentRef, recursive: bool, max_depth: Option<usize>) -> Self {
        Self {
            component,
            recursive,
            max_depth,
        }
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            recursive: self.recursive,
            max_depth: self.max_depth,
        }
    }
}

/// Request parameters for a cascading delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRequest {
    pub component: ComponentRef,
    pub options: DeleteOptions,
}

impl DeleteRequest {
    pub fn new(component: ComponentRef, options: DeleteOptions) -> Self {
        Self { component, options }
    }
}

/// Request parameters for removing components from a solution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveFromSolutionRequest {
    pub solution_unique_name: String,
    /// `None` removes every root component of the solution
    pub component: Option<ComponentRef>,
}

/// Components of one solution, sub-components ahead of root components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionListing {
    pub solution: SolutionRef,
    pub components: Vec<ComponentDescriptor>,
}

/// ComponentCleanupPort - Inbound port for dependency analysis and cleanup
///
/// This port defines the interface that external adapters (CLI, scripts)
/// use to inspect and prune solution components.
pub trait ComponentCleanupPort {
    /// Lists everything that has to be deleted together with `component`
    ///
    /// # Returns
    /// The delete plan in walk order: `component` first, each entry
    /// followed by the components blocking it. A component reached again
    /// is listed again without its blockers.
    ///
    /// # Errors
    /// Returns an error if the store faults during the walk
    fn components_for_delete(&self, component: ComponentRef) -> Result<Vec<ComponentForDelete>>;

    /// Same as [`Self::components_for_delete`], starting from the
    /// component's membership row in the named solution
    ///
    /// # Errors
    /// Returns [`crate::shared::error::PrunerError::ComponentNotInSolution`]
    /// when the component is not part of the solution
    fn solution_component_for_delete(
        &self,
        component: ComponentRef,
        solution_unique_name: &str,
    ) -> Result<Vec<ComponentForDelete>>;

    /// Lists the dependency edges of components depending on the requested one
    fn dependents(&self, request: DependencyRequest) -> Result<Vec<DependencyEdge>>;

    /// Lists the dependency edges of components the requested one depends on
    fn requirements(&self, request: DependencyRequest) -> Result<Vec<DependencyEdge>>;

    /// Deletes a component after everything blocking it
    ///
    /// # Errors
    /// Returns [`crate::shared::error::PrunerError::PartialDeletion`] when a
    /// store fault interrupts the cascade
    fn delete_with_dependencies(&self, request: DeleteRequest) -> Result<DeletionReport>;

    /// Adds a component to a solution
    ///
    /// # Returns
    /// `false` when the component already belonged to the solution or no
    /// solution name was given
    fn add_to_solution(&self, component: ComponentRef, solution_unique_name: &str)
        -> Result<bool>;

    /// Removes one or all root components from a solution
    ///
    /// # Returns
    /// The components actually removed
    fn remove_from_solution(&self, request: RemoveFromSolutionRequest)
        -> Result<Vec<ComponentRef>>;

    /// Lists every component of a solution
    ///
    /// # Errors
    /// Returns [`crate::shared::error::PrunerError::SolutionNotFound`] for an
    /// unknown solution
    fn solution_components(&self, solution_unique_name: &str) -> Result<SolutionListing>;
}
