//! In-memory connection double for reconciliation tests.

use std::collections::HashMap;

use strata_sync::{DriverError, LiveColumn, SchemaConnection};

/// Routes reconciliation logs through the test capture.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Scripted connection: seeded catalog, recorded statements, and an
/// optional statement fragment that triggers a driver error.
pub struct MockConnection {
    product: String,
    pub executed: Vec<String>,
    columns: HashMap<String, Vec<LiveColumn>>,
    row_counts: HashMap<String, i64>,
    fail_on: Option<String>,
}

impl MockConnection {
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            executed: Vec::new(),
            columns: HashMap::new(),
            row_counts: HashMap::new(),
            fail_on: None,
        }
    }

    pub fn with_columns(mut self, table: &str, columns: Vec<LiveColumn>) -> Self {
        self.columns.insert(table.to_string(), columns);
        self
    }

    pub fn with_row_count(mut self, table: &str, rows: i64) -> Self {
        self.row_counts.insert(table.to_string(), rows);
        self
    }

    /// Any executed statement containing `fragment` fails.
    pub fn failing_on(mut self, fragment: &str) -> Self {
        self.fail_on = Some(fragment.to_string());
        self
    }
}

impl SchemaConnection for MockConnection {
    fn product_name(&self) -> &str {
        &self.product
    }

    fn execute(&mut self, sql: &str) -> Result<u64, DriverError> {
        if let Some(fragment) = &self.fail_on {
            if sql.contains(fragment.as_str()) {
                return Err(format!("statement rejected: {sql}").into());
            }
        }
        self.executed.push(sql.to_string());
        Ok(0)
    }

    fn count_rows(&mut self, table: &str) -> Result<i64, DriverError> {
        Ok(self.row_counts.get(table).copied().unwrap_or(0))
    }

    fn table_columns(&mut self, table: &str) -> Result<Vec<LiveColumn>, DriverError> {
        Ok(self.columns.get(table).cloned().unwrap_or_default())
    }
}
