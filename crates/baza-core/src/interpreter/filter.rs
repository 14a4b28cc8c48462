use crate::error::{BazaError, Result};
use crate::sql::{CmpOp, FilterChain, FilterRelation};
use crate::storage::{Table, Value};
use crate::util::{parse_int, parse_int32, RowSet};

/// Match `s` against a LIKE pattern using `%` (zero or more characters) and
/// `_` (exactly one character) wildcards.
pub fn like_match(s: &str, pattern: &str) -> bool {
    let s: Vec<char> = s.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    like_match_inner(&s, &pattern)
}

fn like_match_inner(s: &[char], pattern: &[char]) -> bool {
    match pattern.first() {
        None => s.is_empty(),
        Some('%') => {
            // Greedy: try consuming the rest of the pattern against every
            // suffix of `s`, starting with the longest match for `%`.
            for split in 0..=s.len() {
                if like_match_inner(&s[split..], &pattern[1..]) {
                    return true;
                }
            }
            false
        }
        Some('_') => !s.is_empty() && like_match_inner(&s[1..], &pattern[1..]),
        Some(c) => s.first() == Some(c) && like_match_inner(&s[1..], &pattern[1..]),
    }
}

/// Coerce a raw literal token into a typed [`Value`] for column `column`
/// of type `base_type`, reporting the kind of error appropriate to where
/// the literal came from.
fn coerce(
    raw: &str,
    base_type: crate::storage::BaseType,
    column: &str,
    err: impl Fn(String, &'static str, String) -> BazaError,
) -> Result<Value> {
    use crate::storage::BaseType;
    match base_type {
        BaseType::Int32 => parse_int32(raw)
            .map(Value::Int32)
            .ok_or_else(|| err(column.to_string(), "int32", raw.to_string())),
        BaseType::Int64 => parse_int(raw)
            .map(Value::Int64)
            .ok_or_else(|| err(column.to_string(), "int64", raw.to_string())),
        BaseType::String => Ok(Value::String(raw.to_string())),
    }
}

pub fn coerce_for_filter(raw: &str, base_type: crate::storage::BaseType, column: &str) -> Result<Value> {
    coerce(raw, base_type, column, |column, expected, value| {
        BazaError::FilterValueType {
            column,
            expected,
            value,
        }
    })
}

pub fn coerce_for_value(raw: &str, base_type: crate::storage::BaseType, column: &str) -> Result<Value> {
    coerce(raw, base_type, column, |column, expected, value| {
        BazaError::ValueType {
            column,
            expected,
            value,
        }
    })
}

fn compare(value: &Value, op: CmpOp, needle: &Value) -> bool {
    match op {
        CmpOp::Eq => value == needle,
        CmpOp::NotEq => value != needle,
        CmpOp::Gt | CmpOp::GtEq | CmpOp::Lt | CmpOp::LtEq => {
            let ord = match (value, needle) {
                (Value::Int32(a), Value::Int32(b)) => a.cmp(b),
                (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
                (Value::String(a), Value::String(b)) => a.as_bytes().cmp(b.as_bytes()),
                _ => return false,
            };
            match op {
                CmpOp::Gt => ord == std::cmp::Ordering::Greater,
                CmpOp::GtEq => ord != std::cmp::Ordering::Less,
                CmpOp::Lt => ord == std::cmp::Ordering::Less,
                CmpOp::LtEq => ord != std::cmp::Ordering::Greater,
                _ => unreachable!(),
            }
        }
        CmpOp::Like => match (value, needle) {
            (Value::String(s), Value::String(pattern)) => like_match(s, pattern),
            // Non-string columns have no wildcard syntax; LIKE degrades to equality.
            _ => value == needle,
        },
    }
}

/// Evaluate a filter chain against `table` as a left-fold without operator
/// precedence: AND and OR are applied strictly in the order the predicates
/// appear, with no grouping. This is deliberate and must not be "corrected"
/// to standard precedence; see the predicate-chain property tests.
pub fn evaluate(table: &Table, chain: &FilterChain) -> Result<RowSet> {
    let mut acc: Option<RowSet> = None;
    let mut pending_relation: Option<FilterRelation> = None;

    for predicate in chain {
        let meta = table
            .column_by_name(&predicate.column)
            .ok_or_else(|| BazaError::ColumnNotFound(predicate.column.clone()))?
            .clone();

        let needle = coerce_for_filter(&predicate.value, meta.base_type, &meta.name)?;

        let rows = table.find_rows(&meta.name, |value| compare(value, predicate.op, &needle))?;

        acc = Some(match (acc, pending_relation) {
            (None, _) => rows,
            (Some(_), None) => rows,
            (Some(acc), Some(FilterRelation::And)) => acc
                .intersection(&rows)
                .expect("acc and rows are always distinct RowSet values"),
            (Some(acc), Some(FilterRelation::Or)) => acc
                .union(&rows)
                .expect("acc and rows are always distinct RowSet values"),
        });

        pending_relation = predicate.next_relation;
    }

    Ok(acc.unwrap_or_default())
}
