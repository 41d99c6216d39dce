/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: the snapshot-backed
/// store, the caching decorator, logging, formatting and presentation.
pub mod outbound;
