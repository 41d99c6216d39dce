/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with the component store, logging and output.
pub mod component_store;
pub mod formatter;
pub mod operation_logger;
pub mod output_presenter;

pub use component_store::{AddToSolution, ComponentStore, StateChange, StoreError, StoreResult};
pub use formatter::ResultFormatter;
pub use operation_logger::OperationLogger;
pub use output_presenter::OutputPresenter;
