//! Reconciliation options.

/// Options shared by the reconciliation processors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// When enabled, identifiers are quote-wrapped in emitted SQL and
    /// compared verbatim against the catalog. Off (the default) means
    /// case-insensitive comparison throughout.
    pub case_sensitive: bool,
}

impl SyncOptions {
    /// Creates default options (case-insensitive).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables case-sensitive mode.
    #[must_use]
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }
}

/// Normalizes an identifier for catalog comparison.
pub(crate) fn normalize(name: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        name.to_string()
    } else {
        name.to_uppercase()
    }
}
