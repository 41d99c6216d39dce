/// Use cases module containing application business logic orchestration
mod component_cleanup_service;
mod delete_component;
mod plan_deletion;
mod query_dependencies;
mod solution_membership;

pub use component_cleanup_service::ComponentCleanupService;
pub use delete_component::DeleteComponentUseCase;
pub use plan_deletion::PlanDeletionUseCase;
pub use query_dependencies::QueryDependenciesUseCase;
pub use solution_membership::SolutionMembershipUseCase;
