/// A literal as it appears in query text: the raw token, not yet coerced to
/// a column's declared type. Coercion happens in the interpreter, against
/// the type of whatever column the literal is paired with.
pub type Literal = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    Like,
}

impl CmpOp {
    pub fn parse(word: &str) -> Option<CmpOp> {
        match word {
            "=" => Some(CmpOp::Eq),
            "!=" => Some(CmpOp::NotEq),
            ">" => Some(CmpOp::Gt),
            ">=" => Some(CmpOp::GtEq),
            "<" => Some(CmpOp::Lt),
            "<=" => Some(CmpOp::LtEq),
            _ if word.eq_ignore_ascii_case("like") => Some(CmpOp::Like),
            _ => None,
        }
    }
}

impl std::fmt::Display for CmpOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CmpOp::Eq => "=",
            CmpOp::NotEq => "!=",
            CmpOp::Gt => ">",
            CmpOp::GtEq => ">=",
            CmpOp::Lt => "<",
            CmpOp::LtEq => "<=",
            CmpOp::Like => "LIKE",
        };
        f.write_str(s)
    }
}

/// The relation joining a predicate to the one that follows it. The
/// terminal predicate in a chain carries `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRelation {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub op: CmpOp,
    pub value: Literal,
    pub next_relation: Option<FilterRelation>,
}

/// An ordered, left-fold filter chain: see the module-level evaluator for
/// how `next_relation` is consumed without operator precedence.
pub type FilterChain = Vec<Filter>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub column: String,
    pub value: Literal,
}

/// A parsed statement, one variant per kind of query the grammar accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Select {
        table: String,
        columns: Option<Vec<String>>,
        filters: Option<FilterChain>,
        order_by: Option<(String, SortDirection)>,
    },
    Create {
        table: String,
        column_names: Vec<String>,
        column_types: Vec<String>,
    },
    Insert {
        table: String,
        values: Vec<Literal>,
    },
    Delete {
        table: String,
        filters: Option<FilterChain>,
    },
    Update {
        table: String,
        assignments: Vec<Assignment>,
        filters: Option<FilterChain>,
    },
}
