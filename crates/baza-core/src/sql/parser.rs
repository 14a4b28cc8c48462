use crate::error::{BazaError, Result};
use crate::sql::ast::{Assignment, CmpOp, Filter, FilterChain, FilterRelation, Query, SortDirection};
use crate::sql::lexer::tokenize;
use crate::util::str_ieq;

/// A cursor over a token stream, with helpers for the common
/// expect-a-keyword / expect-a-token / expect-a-word patterns every
/// statement parser below needs.
struct Cursor {
    tokens: Vec<String>,
    pos: usize,
}

impl Cursor {
    fn new(tokens: Vec<String>) -> Cursor {
        Cursor { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(|s| s.as_str())
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> Result<String> {
        let tok = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| BazaError::SqlParse("unexpected end of input".to_string()))?;
        self.pos += 1;
        Ok(tok)
    }

    fn peek_is_keyword(&self, kw: &str) -> bool {
        self.peek().map(|t| str_ieq(t, kw)).unwrap_or(false)
    }

    /// Consume the next token, failing unless it case-insensitively equals
    /// `kw`.
    fn expect_keyword(&mut self, kw: &str) -> Result<()> {
        let tok = self.advance()?;
        if str_ieq(&tok, kw) {
            Ok(())
        } else {
            Err(BazaError::SqlParse(format!("expected `{kw}`, found `{tok}`")))
        }
    }

    /// Consume the next token, failing unless it equals `tok` exactly
    /// (used for punctuation, which is not case-folded).
    fn expect_token(&mut self, tok: &str) -> Result<()> {
        let found = self.advance()?;
        if found == tok {
            Ok(())
        } else {
            Err(BazaError::SqlParse(format!("expected `{tok}`, found `{found}`")))
        }
    }

    /// Consume the next token as a bare identifier/literal.
    fn expect_word(&mut self) -> Result<String> {
        self.advance()
    }
}

/// Parse a single statement, dispatching on its leading keyword.
pub fn parse(input: &str) -> Result<Query> {
    let tokens = tokenize(input);
    if tokens.is_empty() {
        return Err(BazaError::SqlParse("empty query".to_string()));
    }
    let mut cursor = Cursor::new(tokens);
    let keyword = cursor.peek().unwrap_or_default().to_string();

    let query = if str_ieq(&keyword, "SELECT") {
        parse_select(&mut cursor)?
    } else if str_ieq(&keyword, "CREATE") {
        parse_create(&mut cursor)?
    } else if str_ieq(&keyword, "INSERT") {
        parse_insert(&mut cursor)?
    } else if str_ieq(&keyword, "DELETE") {
        parse_delete(&mut cursor)?
    } else if str_ieq(&keyword, "UPDATE") {
        parse_update(&mut cursor)?
    } else {
        return Err(BazaError::SqlParse(format!(
            "expected a statement keyword, found `{keyword}`"
        )));
    };

    if !cursor.at_end() {
        let trailing = cursor.advance()?;
        return Err(BazaError::SqlParse(format!(
            "unexpected trailing token `{trailing}`"
        )));
    }

    Ok(query)
}

/// Parse a bare, comma-separated list that is not enclosed in parens and
/// stops at the first recognized clause keyword (`FROM`, `WHERE`, `ORDER`)
/// or end of input.
fn parse_bare_list(cursor: &mut Cursor) -> Result<Vec<String>> {
    let mut items = vec![cursor.expect_word()?];
    while let Some(",") = cursor.peek() {
        cursor.advance()?;
        items.push(cursor.expect_word()?);
    }
    Ok(items)
}

/// Parse a parenthesized, comma-separated list of single-token elements:
/// `"(" elem ("," elem)* ")"`.
fn parse_bracketed_list(cursor: &mut Cursor) -> Result<Vec<String>> {
    cursor.expect_token("(")?;
    let mut items = Vec::new();
    if cursor.peek() != Some(")") {
        items.push(cursor.expect_word()?);
        while cursor.peek() == Some(",") {
            cursor.advance()?;
            items.push(cursor.expect_word()?);
        }
    }
    cursor.expect_token(")")?;
    Ok(items)
}

fn parse_select(cursor: &mut Cursor) -> Result<Query> {
    cursor.expect_keyword("SELECT")?;

    let columns = if cursor.peek() == Some("*") {
        cursor.advance()?;
        None
    } else {
        Some(parse_bare_list(cursor)?)
    };

    cursor.expect_keyword("FROM")?;
    let table = cursor.expect_word()?;

    let mut filters = None;
    let mut order_by = None;

    loop {
        if cursor.peek_is_keyword("WHERE") {
            if filters.is_some() {
                return Err(BazaError::SqlParse("WHERE may appear at most once".to_string()));
            }
            filters = Some(parse_where(cursor)?);
        } else if cursor.peek_is_keyword("ORDER") {
            if order_by.is_some() {
                return Err(BazaError::SqlParse(
                    "ORDER BY may appear at most once".to_string(),
                ));
            }
            order_by = Some(parse_order(cursor)?);
        } else {
            break;
        }
    }

    Ok(Query::Select {
        table,
        columns,
        filters,
        order_by,
    })
}

fn parse_create(cursor: &mut Cursor) -> Result<Query> {
    cursor.expect_keyword("CREATE")?;
    cursor.expect_keyword("TABLE")?;
    let table = cursor.expect_word()?;

    cursor.expect_token("(")?;
    let mut column_names = Vec::new();
    let mut column_types = Vec::new();
    loop {
        column_names.push(cursor.expect_word()?);
        column_types.push(cursor.expect_word()?);
        if cursor.peek() == Some(",") {
            cursor.advance()?;
            continue;
        }
        break;
    }
    cursor.expect_token(")")?;

    Ok(Query::Create {
        table,
        column_names,
        column_types,
    })
}

fn parse_insert(cursor: &mut Cursor) -> Result<Query> {
    cursor.expect_keyword("INSERT")?;
    cursor.expect_keyword("INTO")?;
    let table = cursor.expect_word()?;
    cursor.expect_keyword("VALUES")?;
    let values = parse_bracketed_list(cursor)?;

    Ok(Query::Insert { table, values })
}

fn parse_delete(cursor: &mut Cursor) -> Result<Query> {
    cursor.expect_keyword("DELETE")?;
    cursor.expect_keyword("FROM")?;
    let table = cursor.expect_word()?;

    let filters = if cursor.peek_is_keyword("WHERE") {
        Some(parse_where(cursor)?)
    } else {
        None
    };

    Ok(Query::Delete { table, filters })
}

fn parse_update(cursor: &mut Cursor) -> Result<Query> {
    cursor.expect_keyword("UPDATE")?;
    let table = cursor.expect_word()?;
    cursor.expect_keyword("SET")?;

    let mut assignments = Vec::new();
    loop {
        let column = cursor.expect_word()?;
        cursor.expect_token("=")?;
        let value = cursor.expect_word()?;
        assignments.push(Assignment { column, value });
        if cursor.peek() == Some(",") {
            cursor.advance()?;
            continue;
        }
        break;
    }

    let filters = if cursor.peek_is_keyword("WHERE") {
        Some(parse_where(cursor)?)
    } else {
        None
    };

    Ok(Query::Update {
        table,
        assignments,
        filters,
    })
}

fn parse_where(cursor: &mut Cursor) -> Result<FilterChain> {
    cursor.expect_keyword("WHERE")?;
    let mut chain = Vec::new();
    loop {
        let column = cursor.expect_word()?;
        let op_tok = cursor.expect_word()?;
        let op = CmpOp::parse(&op_tok)
            .ok_or_else(|| BazaError::SqlParse(format!("unknown comparison operator `{op_tok}`")))?;
        let value = cursor.expect_word()?;

        let next_relation = if cursor.peek_is_keyword("AND") {
            cursor.advance()?;
            Some(FilterRelation::And)
        } else if cursor.peek_is_keyword("OR") {
            cursor.advance()?;
            Some(FilterRelation::Or)
        } else {
            None
        };

        let has_next = next_relation.is_some();
        chain.push(Filter {
            column,
            op,
            value,
            next_relation,
        });

        if !has_next {
            break;
        }
    }
    Ok(chain)
}

fn parse_order(cursor: &mut Cursor) -> Result<(String, SortDirection)> {
    cursor.expect_keyword("ORDER")?;
    cursor.expect_keyword("BY")?;
    let column = cursor.expect_word()?;
    let dir_tok = cursor.expect_word()?;
    let direction = if str_ieq(&dir_tok, "ASC") {
        SortDirection::Asc
    } else if str_ieq(&dir_tok, "DESC") {
        SortDirection::Desc
    } else {
        return Err(BazaError::SqlParse(format!(
            "expected ASC or DESC, found `{dir_tok}`"
        )));
    };
    Ok((column, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::ast::*;

    #[test]
    fn parses_create_table() {
        let q = parse("CREATE TABLE t (name string, age int32)").unwrap();
        assert_eq!(
            q,
            Query::Create {
                table: "t".to_string(),
                column_names: vec!["name".to_string(), "age".to_string()],
                column_types: vec!["string".to_string(), "int32".to_string()],
            }
        );
    }

    #[test]
    fn parses_insert_with_quoted_multiword_value() {
        let q = parse(r#"INSERT INTO t VALUES ("alicia ann", 22)"#).unwrap();
        assert_eq!(
            q,
            Query::Insert {
                table: "t".to_string(),
                values: vec!["alicia ann".to_string(), "22".to_string()],
            }
        );
    }

    #[test]
    fn parses_select_with_star_and_no_filters() {
        let q = parse("SELECT * FROM t").unwrap();
        assert_eq!(
            q,
            Query::Select {
                table: "t".to_string(),
                columns: None,
                filters: None,
                order_by: None,
            }
        );
    }

    #[test]
    fn parses_where_with_left_fold_and_or() {
        let q = parse("SELECT name FROM t WHERE age = 30 OR age = 25 AND name = alice").unwrap();
        let Query::Select { filters, .. } = q else {
            panic!("expected select");
        };
        let chain = filters.unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0].next_relation, Some(FilterRelation::Or));
        assert_eq!(chain[1].next_relation, Some(FilterRelation::And));
        assert_eq!(chain[2].next_relation, None);
    }

    #[test]
    fn where_and_order_by_accepted_in_either_order() {
        let a = parse("SELECT * FROM t WHERE age > 10 ORDER BY age ASC").unwrap();
        let b = parse("SELECT * FROM t ORDER BY age ASC WHERE age > 10").unwrap();
        let (Query::Select { order_by: oa, .. }, Query::Select { order_by: ob, .. }) = (a, b) else {
            panic!("expected select");
        };
        assert_eq!(oa, ob);
    }

    #[test]
    fn rejects_duplicate_where_clause() {
        assert!(parse("SELECT * FROM t WHERE age > 1 WHERE age > 2").is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse("SELECT * FROM t extra").is_err());
    }

    #[test]
    fn parses_update_with_filter() {
        let q = parse("UPDATE t SET age = 99 WHERE name = bob").unwrap();
        assert_eq!(
            q,
            Query::Update {
                table: "t".to_string(),
                assignments: vec![Assignment {
                    column: "age".to_string(),
                    value: "99".to_string(),
                }],
                filters: Some(vec![Filter {
                    column: "name".to_string(),
                    op: CmpOp::Eq,
                    value: "bob".to_string(),
                    next_relation: None,
                }]),
            }
        );
    }

    #[test]
    fn parses_delete_without_filter() {
        let q = parse("DELETE FROM t").unwrap();
        assert_eq!(
            q,
            Query::Delete {
                table: "t".to_string(),
                filters: None,
            }
        );
    }
}
