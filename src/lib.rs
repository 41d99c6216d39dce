//! solution-pruner - dependency analysis and cascading deletion of solution components
//!
//! This library walks the dependency graph of components living in a
//! metadata-driven CRM platform and removes components together with
//! everything that blocks their deletion, following hexagonal architecture
//! and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`component_cleanup`): component model, graph walker,
//!   cascading deleter and deletion policies
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use solution_pruner::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! let snapshot = SnapshotFile::load(Path::new("org-snapshot.json"))?;
//! let store = InMemoryComponentStore::new(snapshot);
//! let service = ComponentCleanupService::new(&store, LogFacadeLogger::new());
//!
//! let assembly: ComponentRef = ComponentRef::new(
//!     ComponentKind::PluginAssembly,
//!     "5f0c3a52-0000-4000-8000-000000000001".parse()?,
//! );
//! let plan = service.components_for_delete(assembly)?;
//! println!("{}", TextFormatter::new(false).format_plan(&plan)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod component_cleanup;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::caching::CachingComponentStore;
    pub use crate::adapters::outbound::console::LogFacadeLogger;
    pub use crate::adapters::outbound::filesystem::{FilePresenter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::snapshot::{InMemoryComponentStore, Snapshot, SnapshotFile};
    pub use crate::application::dto::OutputFormat;
    pub use crate::application::use_cases::ComponentCleanupService;
    pub use crate::component_cleanup::domain::{
        ComponentDescriptor, ComponentForDelete, ComponentKind, ComponentRef, DeletionOutcome,
        DeletionReport, DependencyEdge, SolutionRef,
    };
    pub use crate::component_cleanup::services::{
        CascadingDeleter, DeleteOptions, DependencyWalker, WalkOptions,
    };
    pub use crate::ports::inbound::{
        ComponentCleanupPort, DeleteRequest, DependencyRequest, RemoveFromSolutionRequest,
    };
    pub use crate::ports::outbound::{
        ComponentStore, OperationLogger, OutputPresenter, ResultFormatter, StoreError,
    };
    pub use crate::shared::Result;
}
