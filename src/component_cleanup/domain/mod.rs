pub mod component;
pub mod deletion_report;
pub mod dependency;
pub mod descriptor;
pub mod record;

pub use component::{ComponentKind, ComponentRef, MetadataKind, RecordBinding};
pub use deletion_report::{DeletionEntry, DeletionOutcome, DeletionReport, PreservationReason};
pub use dependency::{DependencyEdge, DependencyKind, DependencyRecord, Direction};
pub use descriptor::{ComponentDescriptor, ComponentForDelete, SolutionComponent, SolutionRef};
pub use record::{EntityRecord, SchemaMetadata};
