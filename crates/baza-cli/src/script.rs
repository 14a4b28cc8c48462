use std::path::Path;

use anyhow::{Context, Result};

/// Read a `.sql` script file and split it into statement texts.
///
/// Within each statement, lines beginning with `#` (after trimming leading
/// whitespace) are treated as comments and dropped before the remaining
/// lines are rejoined into one statement.
pub fn read_statements(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading script file {}", path.display()))?;

    let statements = contents
        .split(';')
        .filter_map(strip_comments_and_trim)
        .collect();
    Ok(statements)
}

fn strip_comments_and_trim(chunk: &str) -> Option<String> {
    let body: Vec<&str> = chunk
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    if body.is_empty() {
        None
    } else {
        Some(body.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comment_lines_and_joins_statement_body() {
        let chunk = "\n# a comment\nSELECT * FROM t\n";
        assert_eq!(strip_comments_and_trim(chunk), Some("SELECT * FROM t".to_string()));
    }

    #[test]
    fn empty_chunk_yields_no_statement() {
        assert_eq!(strip_comments_and_trim("\n  \n# only a comment\n"), None);
    }
}
