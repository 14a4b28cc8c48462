use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{BazaError, Result};
use crate::storage::table::Table;

static TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// The set of tables that make up a database, keyed by both name and
/// monotonic id.
#[derive(Default)]
pub struct Database {
    tables: HashMap<String, Table>,
    ids: HashMap<u64, String>,
}

impl Database {
    pub fn new() -> Database {
        Database {
            tables: HashMap::new(),
            ids: HashMap::new(),
        }
    }

    /// Create an empty table named `name`, returning its monotonic id.
    pub fn create_table(&mut self, name: &str) -> Result<u64> {
        if self.tables.contains_key(name) {
            return Err(BazaError::DuplicateTable(name.to_string()));
        }
        let id = TABLE_ID.fetch_add(1, Ordering::Relaxed);
        self.tables.insert(name.to_string(), Table::new(name));
        self.ids.insert(id, name.to_string());
        Ok(id)
    }

    pub fn get_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| BazaError::TableNotFound(name.to_string()))
    }

    pub fn get_table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| BazaError::TableNotFound(name.to_string()))
    }

    pub fn get_table_by_id(&self, id: u64) -> Result<&Table> {
        let name = self
            .ids
            .get(&id)
            .ok_or_else(|| BazaError::TableNotFound(format!("#{id}")))?;
        self.get_table(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|s| s.as_str())
    }
}
