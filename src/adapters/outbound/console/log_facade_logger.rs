use crate::ports::outbound::OperationLogger;

/// OperationLogger that forwards to the `log` facade.
///
/// Verbose messages map to `debug`, so they only show up with `-v` or an
/// explicit `RUST_LOG`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacadeLogger;

impl LogFacadeLogger {
    pub fn new() -> Self {
        Self
    }
}

impl OperationLogger for LogFacadeLogger {
    fn verbose(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn information(&self, message: &str) {
        log::info!("{}", message);
    }

    fn warning(&self, message: &str) {
        log::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        log::error!("{}", message);
    }
}
