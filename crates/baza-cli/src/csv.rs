use std::path::Path;

use anyhow::{Context, Result};
use baza_core::sql::Query;
use baza_core::util::split_quoted;
use baza_core::{execute, Database};

/// Load one table from a CSV file: line 1 is column names, line 2 is type
/// names, and every line after that is one row of values. Statements are
/// built as [`Query`] values directly rather than re-serialized to text and
/// re-parsed, since the fields are already structured.
pub fn load_table(db: &mut Database, path: &Path, delimiter: char, table_name: &str) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading CSV file {}", path.display()))?;
    let mut lines = contents.lines();

    let header = lines
        .next()
        .with_context(|| format!("{}: missing column-name header line", path.display()))?;
    let types_line = lines
        .next()
        .with_context(|| format!("{}: missing column-type header line", path.display()))?;

    let delim = delimiter.to_string();
    let column_names = split_quoted(header, &delim);
    let column_types = split_quoted(types_line, &delim);

    let create = Query::Create {
        table: table_name.to_string(),
        column_names: column_names.clone(),
        column_types,
    };
    execute(db, create).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;

    for (lineno, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let values = split_quoted(line, &delim);
        if values.len() != column_names.len() {
            anyhow::bail!(
                "{}: row {} has {} values but {} columns were declared",
                path.display(),
                lineno + 3,
                values.len(),
                column_names.len()
            );
        }
        let insert = Query::Insert {
            table: table_name.to_string(),
            values,
        };
        execute(db, insert)
            .map_err(|e| anyhow::anyhow!("{}: row {}: {e}", path.display(), lineno + 3))?;
    }

    Ok(())
}
