mod caching_component_store;

pub use caching_component_store::CachingComponentStore;
