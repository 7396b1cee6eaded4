//! Database backend trait for abstracting different database implementations.

use std::error::Error;
use cozo::DataValue;

use super::schema::SchemaRelation;

/// Type alias for query parameters.
pub type Params = std::collections::BTreeMap<String, DataValue>;

/// Result of a query execution.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<DataValue>>,
}

impl QueryResult {
    /// True when the query returned no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trait for database backends that can execute scripts.
pub trait DatabaseBackend: Send + Sync {
    /// Execute a script with parameters, returning raw rows.
    fn execute_query(&self, script: &str, params: &Params) -> Result<QueryResult, Box<dyn Error>>;

    /// Execute a script without parameters.
    fn execute_query_no_params(&self, script: &str) -> Result<QueryResult, Box<dyn Error>> {
        self.execute_query(script, &Params::new())
    }

    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;

    /// Check if a relation (table) exists.
    fn relation_exists(&self, name: &str) -> Result<bool, Box<dyn Error>>;

    /// Create a relation if it doesn't exist.
    /// Returns true if created, false if already existed.
    fn try_create_relation(&self, ddl: &str) -> Result<bool, Box<dyn Error>>;

    /// Remove every row of a relation, keeping the relation itself.
    fn clear_relation(&self, relation: &SchemaRelation) -> Result<(), Box<dyn Error>>;
}
