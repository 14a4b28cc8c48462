//! The query interpreter: pattern-matches on the [`Query`] tag and drives
//! the storage primitives.

mod filter;

pub use filter::{evaluate, like_match};

use tracing::{debug, instrument};

use crate::error::{BazaError, Result};
use crate::sql::{Query, SortDirection};
use crate::storage::{BaseType, Database, Value};

/// What a single statement produced: a plain acknowledgement, or the
/// rendered rows of a `SELECT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Rows(Vec<String>),
}

/// Execute one parsed statement against `db`.
#[instrument(skip(db, query), fields(kind = query_kind(&query)))]
pub fn execute(db: &mut Database, query: Query) -> Result<Outcome> {
    match query {
        Query::Create {
            table,
            column_names,
            column_types,
        } => execute_create(db, table, column_names, column_types),
        Query::Insert { table, values } => execute_insert(db, table, values),
        Query::Delete { table, filters } => execute_delete(db, table, filters),
        Query::Update {
            table,
            assignments,
            filters,
        } => execute_update(db, table, assignments, filters),
        Query::Select {
            table,
            columns,
            filters,
            order_by,
        } => execute_select(db, table, columns, filters, order_by),
    }
}

fn query_kind(query: &Query) -> &'static str {
    match query {
        Query::Select { .. } => "select",
        Query::Create { .. } => "create",
        Query::Insert { .. } => "insert",
        Query::Delete { .. } => "delete",
        Query::Update { .. } => "update",
    }
}

fn execute_create(
    db: &mut Database,
    table: String,
    column_names: Vec<String>,
    column_types: Vec<String>,
) -> Result<Outcome> {
    if column_names.len() != column_types.len() {
        return Err(BazaError::InvalidQuery(
            "CREATE TABLE column names and types must have the same length".to_string(),
        ));
    }

    let types: Vec<BaseType> = column_types
        .iter()
        .map(|t| BaseType::parse(t))
        .collect::<Result<_>>()?;

    db.create_table(&table)?;
    let created = db.get_table_mut(&table)?;
    for (name, base_type) in column_names.into_iter().zip(types.into_iter()) {
        created.add_column(&name, base_type)?;
    }

    debug!(table = %table, "created table");
    Ok(Outcome::Ok)
}

fn execute_insert(db: &mut Database, table: String, values: Vec<String>) -> Result<Outcome> {
    let t = db.get_table_mut(&table)?;
    let metas: Vec<_> = t.column_metas().cloned().collect();
    if values.len() != metas.len() {
        return Err(BazaError::InvalidQuery(format!(
            "table `{table}` has {} columns but {} values were given",
            metas.len(),
            values.len()
        )));
    }

    let mut coerced = Vec::with_capacity(values.len());
    for (meta, raw) in metas.iter().zip(values.iter()) {
        coerced.push(filter::coerce_for_value(raw, meta.base_type, &meta.name)?);
    }

    t.add_row(coerced)?;
    Ok(Outcome::Ok)
}

fn execute_delete(
    db: &mut Database,
    table: String,
    filters: Option<crate::sql::FilterChain>,
) -> Result<Outcome> {
    let t = db.get_table_mut(&table)?;

    match filters {
        None => {
            let count = t.row_count();
            for _ in 0..count {
                t.delete_row(0)?;
            }
        }
        Some(chain) => {
            let matches = evaluate(t, &chain)?;
            for (deleted_so_far, row) in matches.iter().enumerate() {
                t.delete_row(row as usize - deleted_so_far)?;
            }
        }
    }

    Ok(Outcome::Ok)
}

fn execute_update(
    db: &mut Database,
    table: String,
    assignments: Vec<crate::sql::Assignment>,
    filters: Option<crate::sql::FilterChain>,
) -> Result<Outcome> {
    let t = db.get_table_mut(&table)?;

    let mut resolved = Vec::with_capacity(assignments.len());
    for assignment in &assignments {
        let meta = t
            .column_by_name(&assignment.column)
            .ok_or_else(|| BazaError::ColumnNotFound(assignment.column.clone()))?
            .clone();
        let value = filter::coerce_for_value(&assignment.value, meta.base_type, &meta.name)?;
        resolved.push((meta.name, value));
    }

    let rows: Vec<u64> = match &filters {
        None => (0..t.row_count() as u64).collect(),
        Some(chain) => evaluate(t, chain)?.iter().collect(),
    };

    for row in rows {
        for (column, value) in &resolved {
            t.set_cell(column, row as usize, value.clone())?;
        }
    }

    Ok(Outcome::Ok)
}

fn execute_select(
    db: &Database,
    table: String,
    columns: Option<Vec<String>>,
    filters: Option<crate::sql::FilterChain>,
    order_by: Option<(String, SortDirection)>,
) -> Result<Outcome> {
    let t = db.get_table(&table)?;

    if let Some(names) = &columns {
        for name in names {
            t.column_by_name(name)
                .ok_or_else(|| BazaError::ColumnNotFound(name.clone()))?;
        }
    }

    let mut rows: Vec<u64> = match &filters {
        None => (0..t.row_count() as u64).collect(),
        Some(chain) => evaluate(t, chain)?.iter().collect(),
    };

    if let Some((column, direction)) = &order_by {
        sort_rows(t, &mut rows, column, *direction)?;
    }

    let mut rendered = Vec::with_capacity(rows.len());
    for row in rows {
        rendered.push(t.print_row(row as usize, columns.as_deref())?);
    }

    Ok(Outcome::Rows(rendered))
}

fn sort_rows(
    table: &crate::storage::Table,
    rows: &mut [u64],
    column: &str,
    direction: SortDirection,
) -> Result<()> {
    table
        .column_by_name(column)
        .ok_or_else(|| BazaError::ColumnNotFound(column.to_string()))?;

    let mut keyed: Vec<(u64, Value)> = rows
        .iter()
        .map(|&row| {
            let value = table.get_cell(column, row as usize)?;
            Ok((row, value))
        })
        .collect::<Result<_>>()?;

    keyed.sort_by(|(_, a), (_, b)| {
        let ord = match (a, b) {
            (Value::Int32(x), Value::Int32(y)) => x.cmp(y),
            (Value::Int64(x), Value::Int64(y)) => x.cmp(y),
            (Value::String(x), Value::String(y)) => x.as_bytes().cmp(y.as_bytes()),
            _ => std::cmp::Ordering::Equal,
        };
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    for (slot, (row, _)) in rows.iter_mut().zip(keyed.into_iter()) {
        *slot = row;
    }
    Ok(())
}
