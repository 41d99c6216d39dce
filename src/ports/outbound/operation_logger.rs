/// OperationLogger port for levelled messages emitted while walking and
/// deleting components
///
/// The core never prints; it reports through this port so the
/// presentation layer decides where messages go.
pub trait OperationLogger: Send + Sync {
    /// Step-by-step detail (checked dependencies, issued requests)
    fn verbose(&self, message: &str);

    /// Noteworthy but expected events, e.g. a component left in place on purpose
    fn information(&self, message: &str);

    /// Tolerated problems: vanished objects, unsupported kinds
    fn warning(&self, message: &str);

    fn error(&self, message: &str);
}

impl<L: OperationLogger + ?Sized> OperationLogger for &L {
    fn verbose(&self, message: &str) {
        (**self).verbose(message)
    }

    fn information(&self, message: &str) {
        (**self).information(message)
    }

    fn warning(&self, message: &str) {
        (**self).warning(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}
