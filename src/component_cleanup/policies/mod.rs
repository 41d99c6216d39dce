pub mod composite_flow;
pub mod managed_filter;

pub use composite_flow::CompositeFlowPolicy;
pub use managed_filter::ManagedFilter;
