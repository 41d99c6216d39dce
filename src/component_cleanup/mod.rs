/// Component cleanup - dependency analysis and cascading deletion
///
/// - `domain`: component identities, descriptors, dependency records and deletion reports
/// - `services`: graph walking, descriptor resolution and the cascading deleter
/// - `policies`: decisions that keep components in place or rewrite them
pub mod domain;
pub mod policies;
pub mod services;
