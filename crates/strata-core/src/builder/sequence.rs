//! Sequence and identity query builders.

use crate::dialect::Dialect;

/// Builds the query fetching the next value of a named sequence.
pub struct NextSequenceBuilder<'a> {
    dialect: &'a dyn Dialect,
    sequence: String,
    case_sensitive: bool,
}

impl<'a> NextSequenceBuilder<'a> {
    /// Creates a builder for the given sequence.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, sequence: impl Into<String>) -> Self {
        Self {
            dialect,
            sequence: sequence.into(),
            case_sensitive: false,
        }
    }

    /// Enables case-sensitive identifier quoting.
    #[must_use]
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Builds the next-value query.
    #[must_use]
    pub fn build(self) -> String {
        let sequence = self.dialect.quote(&self.sequence, self.case_sensitive);
        self.dialect.next_value_sql(&sequence)
    }
}

/// Builds the query fetching the last generated identity value.
pub struct LastIdentityBuilder<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> LastIdentityBuilder<'a> {
    /// Creates the builder.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Builds the last-identity query.
    #[must_use]
    pub fn build(self) -> String {
        self.dialect.last_identity_sql()
    }
}
