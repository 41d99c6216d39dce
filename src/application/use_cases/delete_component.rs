use crate::component_cleanup::domain::DeletionReport;
use crate::component_cleanup::services::CascadingDeleter;
use crate::ports::inbound::DeleteRequest;
use crate::ports::outbound::{ComponentStore, OperationLogger};
use crate::shared::Result;

/// DeleteComponentUseCase - deletes a component and everything blocking it
///
/// Strategies read live state, so the store is used without a cache.
pub struct DeleteComponentUseCase<S, L> {
    store: S,
    logger: L,
}

impl<S: ComponentStore, L: OperationLogger> DeleteComponentUseCase<S, L> {
    pub fn new(store: S, logger: L) -> Self {
        Self { store, logger }
    }

    pub fn execute(&self, request: DeleteRequest) -> Result<DeletionReport> {
        let deleter = CascadingDeleter::new(&self.store, &self.logger, request.options);
        let report = deleter.delete_with_dependencies(request.component)?;

        self.logger.information(&format!(
            "Processed {} component(s) for {}, {} removed",
            report.len(),
            request.component,
            report.removed_count()
        ));
        Ok(report)
    }
}
