use crate::component_cleanup::domain::{
    ComponentDescriptor, ComponentForDelete, DeletionReport, DependencyEdge, SolutionRef,
};
use crate::shared::Result;

/// ResultFormatter port for rendering query and deletion results
///
/// Implementations exist for machine-readable JSON and a human-readable
/// text listing.
pub trait ResultFormatter {
    /// Formats a delete plan in walk order
    fn format_plan(&self, plan: &[ComponentForDelete]) -> Result<String>;

    /// Formats dependency edges from a dependents/requirements walk
    fn format_edges(&self, edges: &[DependencyEdge]) -> Result<String>;

    /// Formats the outcome of a cascading delete
    fn format_report(&self, report: &DeletionReport) -> Result<String>;

    /// Formats the components of a solution
    fn format_components(
        &self,
        solution: &SolutionRef,
        components: &[ComponentDescriptor],
    ) -> Result<String>;
}
