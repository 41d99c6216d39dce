pub mod cascading_deleter;
pub mod deletion_strategies;
pub mod dependency_queries;
pub mod descriptor_resolver;
pub mod graph_walker;

pub use cascading_deleter::{CascadingDeleter, DeleteOptions, DeletionContext, VisitedSet};
pub use deletion_strategies::{
    DeletionStrategy, OptionSetStrategy, ProcessDefinitionStrategy, RecordStrategy,
    RelationshipStrategy, StrategyRegistry, StructuralTypeStrategy, UnsupportedKindStrategy,
};
pub use dependency_queries::DependencyQueries;
pub use descriptor_resolver::ComponentDescriptorResolver;
pub use graph_walker::{DeletePlanWalk, DependencyEdgeWalk, DependencyWalker, WalkOptions};
