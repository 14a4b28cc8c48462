use crate::error::{BazaError, Result};
use crate::storage::types::BaseType;

/// A single typed cell, used at the boundaries between storage and the SQL
/// front end (literals, filter operands, printed output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    String(String),
}

impl Value {
    pub fn base_type(&self) -> BaseType {
        match self {
            Value::Int32(_) => BaseType::Int32,
            Value::Int64(_) => BaseType::Int64,
            Value::String(_) => BaseType::String,
        }
    }

    pub fn to_display_string(&self) -> String {
        match self {
            Value::Int32(v) => v.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::String(v) => v.clone(),
        }
    }
}

/// Column storage: one variant per declared type, so every access is
/// statically known to match the column's type without a separate tag
/// field to keep in sync.
#[derive(Debug, Clone)]
pub enum ColumnData {
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    String(Vec<String>),
}

impl ColumnData {
    pub fn new(base_type: BaseType) -> ColumnData {
        match base_type {
            BaseType::Int32 => ColumnData::Int32(Vec::new()),
            BaseType::Int64 => ColumnData::Int64(Vec::new()),
            BaseType::String => ColumnData::String(Vec::new()),
        }
    }

    pub fn base_type(&self) -> BaseType {
        match self {
            ColumnData::Int32(_) => BaseType::Int32,
            ColumnData::Int64(_) => BaseType::Int64,
            ColumnData::String(_) => BaseType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int32(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn type_error(&self, column: &str, value: &Value) -> BazaError {
        BazaError::ValueType {
            column: column.to_string(),
            expected: self.base_type().name(),
            value: value.to_display_string(),
        }
    }

    /// Append `value` as a new row, failing if it doesn't match this
    /// column's type.
    pub fn push(&mut self, column: &str, value: Value) -> Result<()> {
        match (self, &value) {
            (ColumnData::Int32(v), Value::Int32(x)) => v.push(*x),
            (ColumnData::Int64(v), Value::Int64(x)) => v.push(*x),
            (ColumnData::String(v), Value::String(x)) => v.push(x.clone()),
            (col, _) => return Err(col.type_error(column, &value)),
        }
        Ok(())
    }

    pub fn get(&self, row: usize) -> Option<Value> {
        match self {
            ColumnData::Int32(v) => v.get(row).copied().map(Value::Int32),
            ColumnData::Int64(v) => v.get(row).copied().map(Value::Int64),
            ColumnData::String(v) => v.get(row).cloned().map(Value::String),
        }
    }

    /// Overwrite the value at `row`, as used by `UPDATE`.
    pub fn set(&mut self, column: &str, row: usize, value: Value) -> Result<()> {
        match (self, &value) {
            (ColumnData::Int32(v), Value::Int32(x)) => {
                let slot = v
                    .get_mut(row)
                    .ok_or_else(|| BazaError::IndexOutOfBounds(row as u64, v.len() as u64))?;
                *slot = *x;
            }
            (ColumnData::Int64(v), Value::Int64(x)) => {
                let slot = v
                    .get_mut(row)
                    .ok_or_else(|| BazaError::IndexOutOfBounds(row as u64, v.len() as u64))?;
                *slot = *x;
            }
            (ColumnData::String(v), Value::String(x)) => {
                let slot = v
                    .get_mut(row)
                    .ok_or_else(|| BazaError::IndexOutOfBounds(row as u64, v.len() as u64))?;
                *slot = x.clone();
            }
            (col, _) => return Err(col.type_error(column, &value)),
        }
        Ok(())
    }

    /// Remove the row at `row`, shifting every following row down by one.
    pub fn remove(&mut self, row: usize) -> Result<()> {
        let len = self.len();
        if row >= len {
            return Err(BazaError::IndexOutOfBounds(row as u64, len as u64));
        }
        match self {
            ColumnData::Int32(v) => {
                v.remove(row);
            }
            ColumnData::Int64(v) => {
                v.remove(row);
            }
            ColumnData::String(v) => {
                v.remove(row);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_mismatched_type() {
        let mut col = ColumnData::new(BaseType::Int32);
        assert!(col.push("age", Value::String("x".into())).is_err());
        assert!(col.push("age", Value::Int32(7)).is_ok());
        assert_eq!(col.get(0), Some(Value::Int32(7)));
    }

    #[test]
    fn remove_shifts_subsequent_rows_down() {
        let mut col = ColumnData::new(BaseType::Int64);
        for v in [10, 20, 30] {
            col.push("id", Value::Int64(v)).unwrap();
        }
        col.remove(0).unwrap();
        assert_eq!(col.get(0), Some(Value::Int64(20)));
        assert_eq!(col.get(1), Some(Value::Int64(30)));
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut col = ColumnData::new(BaseType::String);
        col.push("name", Value::String("alice".into())).unwrap();
        col.set("name", 0, Value::String("bob".into())).unwrap();
        assert_eq!(col.get(0), Some(Value::String("bob".into())));
    }
}
