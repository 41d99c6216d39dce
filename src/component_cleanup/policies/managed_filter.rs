/// Decides whether a component is left alone because it is managed.
///
/// A component whose managed flag could not be determined is treated as
/// unmanaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManagedFilter {
    unmanaged_only: bool,
}

impl ManagedFilter {
    pub fn new(unmanaged_only: bool) -> Self {
        Self { unmanaged_only }
    }

    pub fn is_enabled(&self) -> bool {
        self.unmanaged_only
    }

    pub fn skips(&self, is_managed: Option<bool>) -> bool {
        self.unmanaged_only && is_managed == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_filter_skips_nothing() {
        let filter = ManagedFilter::new(false);
        assert!(!filter.skips(Some(true)));
        assert!(!filter.skips(Some(false)));
        assert!(!filter.skips(None));
    }

    #[test]
    fn test_enabled_filter_skips_only_managed() {
        let filter = ManagedFilter::new(true);
        assert!(filter.skips(Some(true)));
        assert!(!filter.skips(Some(false)));
        assert!(!filter.skips(None));
    }
}
