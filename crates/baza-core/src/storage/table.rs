use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{BazaError, Result};
use crate::storage::column::{ColumnData, Value};
use crate::storage::types::BaseType;
use crate::util::{count_utf8_glyphs, RowSet};

/// Human-readable rows are padded to this many UTF-8 glyphs per cell.
const PRINT_ROW_PADDING: usize = 20;

static COLUMN_ID: AtomicU64 = AtomicU64::new(1);

/// A single column's identity and declared type, separate from its backing
/// data so callers can resolve columns by name or id without touching the
/// storage itself.
#[derive(Debug, Clone)]
pub struct ColumnMeta {
    pub id: u64,
    pub name: String,
    pub base_type: BaseType,
}

struct Column {
    meta: ColumnMeta,
    data: ColumnData,
}

/// An in-memory table: an ordered sequence of columns sharing one row
/// count.
pub struct Table {
    name: String,
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Table {
        Table {
            name: name.into(),
            columns: Vec::new(),
            row_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_metas(&self) -> impl Iterator<Item = &ColumnMeta> {
        self.columns.iter().map(|c| &c.meta)
    }

    /// Add a new column. Fails if a populated table would need to backfill
    /// existing rows (schema evolution on populated tables is a non-goal)
    /// or if the name is already taken.
    pub fn add_column(&mut self, name: &str, base_type: BaseType) -> Result<u64> {
        if self.columns.iter().any(|c| c.meta.name == name) {
            return Err(BazaError::DuplicateColumnName(name.to_string()));
        }
        if self.row_count != 0 {
            return Err(BazaError::TableNotEmpty(self.name.clone()));
        }
        let id = COLUMN_ID.fetch_add(1, Ordering::Relaxed);
        self.columns.push(Column {
            meta: ColumnMeta {
                id,
                name: name.to_string(),
                base_type,
            },
            data: ColumnData::new(base_type),
        });
        Ok(id)
    }

    pub fn column_by_name(&self, name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().map(|c| &c.meta).find(|m| m.name == name)
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.meta.name == name)
            .ok_or_else(|| BazaError::ColumnNotFound(name.to_string()))
    }

    /// Append a new row. `values` must supply exactly one value per column,
    /// in declared column order.
    pub fn add_row(&mut self, values: Vec<Value>) -> Result<u64> {
        if values.len() != self.columns.len() {
            return Err(BazaError::InvalidQuery(format!(
                "table `{}` has {} columns but {} values were given",
                self.name,
                self.columns.len(),
                values.len()
            )));
        }
        for (col, value) in self.columns.iter_mut().zip(values.into_iter()) {
            col.data.push(&col.meta.name, value)?;
        }
        let row = self.row_count as u64;
        self.row_count += 1;
        Ok(row)
    }

    pub fn get_cell(&self, column: &str, row: usize) -> Result<Value> {
        let idx = self.column_index(column)?;
        self.columns[idx]
            .data
            .get(row)
            .ok_or_else(|| BazaError::IndexOutOfBounds(row as u64, self.row_count as u64))
    }

    pub fn set_cell(&mut self, column: &str, row: usize, value: Value) -> Result<()> {
        let idx = self.column_index(column)?;
        self.columns[idx].data.set(column, row, value)
    }

    /// Remove `row`, shifting every following row down by one across every
    /// column.
    pub fn delete_row(&mut self, row: usize) -> Result<()> {
        if row >= self.row_count {
            return Err(BazaError::IndexOutOfBounds(row as u64, self.row_count as u64));
        }
        for col in &mut self.columns {
            col.data.remove(row)?;
        }
        self.row_count -= 1;
        Ok(())
    }

    /// Return the row ids, in ascending order, for which `pred` holds
    /// against `column`'s value.
    pub fn find_rows<F>(&self, column: &str, mut pred: F) -> Result<RowSet>
    where
        F: FnMut(&Value) -> bool,
    {
        let idx = self.column_index(column)?;
        let mut matches = RowSet::new();
        for row in 0..self.row_count {
            let value = self.columns[idx]
                .data
                .get(row)
                .expect("row < row_count must be in bounds");
            if pred(&value) {
                matches.insert(row as u64);
            }
        }
        Ok(matches)
    }

    /// Render `row` as padded cells for every column in `projection`
    /// (declared order), or every column if `projection` is `None`.
    pub fn print_row(&self, row: usize, projection: Option<&[String]>) -> Result<String> {
        let mut out = String::new();
        for col in &self.columns {
            if let Some(names) = projection {
                if !names.iter().any(|n| n == &col.meta.name) {
                    continue;
                }
            }
            let value = col
                .data
                .get(row)
                .ok_or_else(|| BazaError::IndexOutOfBounds(row as u64, self.row_count as u64))?;
            let as_str = value.to_display_string();
            let glyphs = count_utf8_glyphs(&as_str);
            out.push_str(&as_str);
            out.push_str(&" ".repeat(PRINT_ROW_PADDING.saturating_sub(glyphs)));
        }
        Ok(out)
    }
}
