/// Mock implementations for testing
mod mock_component_store;
mod mock_operation_logger;

pub use mock_component_store::MockComponentStore;
pub use mock_operation_logger::MockOperationLogger;
