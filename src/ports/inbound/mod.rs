/// Inbound ports - the application's public API
pub mod component_cleanup_port;

pub use component_cleanup_port::{
    ComponentCleanupPort, DeleteRequest, DependencyRequest, RemoveFromSolutionRequest,
    SolutionListing,
};
