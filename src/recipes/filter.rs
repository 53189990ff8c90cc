//! Filter parsing for the recipe search endpoint.
//!
//! Numeric filters accept an optional leading comparison operator (`<`, `>`,
//! `<=`, `>=`, `=`) followed by a number, e.g. `rating=>=4` or `calories=<500`.
//! Text filters are always case-insensitive substring matches. Every column
//! expression and operator comes from a closed set below; user input only ever
//! reaches SQL through `push_bind`.

use lazy_static::lazy_static;
use regex::Regex;
use sqlx::{Postgres, QueryBuilder};

use super::dto::SearchParams;

lazy_static! {
    static ref OPERATOR_RE: Regex = Regex::new(r"^([<>]=?|=)?(.+)$").unwrap();
    static ref INT_PREFIX_RE: Regex = Regex::new(r"^\s*([+-]?\d+)").unwrap();
    static ref DECIMAL_PREFIX_RE: Regex =
        Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    /// Unknown or missing tokens compare for equality.
    fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("<=") => CompareOp::Le,
            Some(">=") => CompareOp::Ge,
            Some("<") => CompareOp::Lt,
            Some(">") => CompareOp::Gt,
            _ => CompareOp::Eq,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    Integer,
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Integer(i64),
    Decimal(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColumn {
    Title,
    Cuisine,
}

impl TextColumn {
    pub fn as_sql(self) -> &'static str {
        match self {
            TextColumn::Title => "title",
            TextColumn::Cuisine => "cuisine",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Rating,
    TotalTime,
    PrepTime,
    CookTime,
    /// `nutrients->>'calories'` with units stripped; no digits reads as NULL.
    Calories,
}

impl NumericField {
    pub fn kind(self) -> OperandKind {
        match self {
            NumericField::Rating => OperandKind::Decimal,
            _ => OperandKind::Integer,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            NumericField::Rating => "rating",
            NumericField::TotalTime => "total_time",
            NumericField::PrepTime => "prep_time",
            NumericField::CookTime => "cook_time",
            NumericField::Calories => {
                "CAST(NULLIF(regexp_replace(nutrients->>'calories', '[^0-9.]', '', 'g'), '') AS NUMERIC)"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Contains { column: TextColumn, needle: String },
    Compare { field: NumericField, op: CompareOp, value: Operand },
}

/// A conjunction of predicates; empty matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub predicates: Vec<Predicate>,
}

impl SearchFilter {
    pub fn from_params(params: &SearchParams) -> Self {
        let mut predicates = Vec::new();

        let texts = [
            (TextColumn::Title, &params.title),
            (TextColumn::Cuisine, &params.cuisine),
        ];
        for (column, raw) in texts {
            if let Some(needle) = non_empty(raw) {
                predicates.push(Predicate::Contains {
                    column,
                    needle: needle.to_string(),
                });
            }
        }

        let numerics = [
            (NumericField::Rating, &params.rating),
            (NumericField::TotalTime, &params.total_time),
            (NumericField::PrepTime, &params.prep_time),
            (NumericField::CookTime, &params.cook_time),
            (NumericField::Calories, &params.calories),
        ];
        for (field, raw) in numerics {
            let Some(raw) = non_empty(raw) else { continue };
            match parse_comparison(raw, field.kind()) {
                Some((op, value)) => predicates.push(Predicate::Compare { field, op, value }),
                None => tracing::debug!(field = ?field, raw, "dropping unparseable filter"),
            }
        }

        Self { predicates }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Appends ` WHERE 1=1 AND ...` to `qb`.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE 1=1");
        for predicate in &self.predicates {
            qb.push(" AND ");
            match predicate {
                Predicate::Contains { column, needle } => {
                    qb.push(column.as_sql())
                        .push(" ILIKE ")
                        .push_bind(format!("%{}%", escape_like(needle)));
                }
                Predicate::Compare { field, op, value } => {
                    qb.push(field.as_sql()).push(" ").push(op.as_sql()).push(" ");
                    match *value {
                        Operand::Integer(v) => qb.push_bind(v),
                        Operand::Decimal(v) => qb.push_bind(v),
                    };
                }
            }
        }
    }
}

fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().filter(|v| !v.is_empty())
}

/// Splits an optional leading operator from the operand.
pub fn split_operator(raw: &str) -> Option<(CompareOp, &str)> {
    let caps = OPERATOR_RE.captures(raw)?;
    let op = CompareOp::from_token(caps.get(1).map(|m| m.as_str()));
    let operand = caps.get(2)?.as_str();
    Some((op, operand))
}

pub fn parse_comparison(raw: &str, kind: OperandKind) -> Option<(CompareOp, Operand)> {
    let (op, operand) = split_operator(raw)?;
    let value = match kind {
        OperandKind::Integer => Operand::Integer(leading_int(operand)?),
        OperandKind::Decimal => Operand::Decimal(leading_decimal(operand)?),
    };
    Some((op, value))
}

/// Reads the integer at the start of `s`, ignoring whatever follows it.
pub fn leading_int(s: &str) -> Option<i64> {
    let caps = INT_PREFIX_RE.captures(s)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Reads the decimal at the start of `s`; `NaN` and infinities are absent.
pub fn leading_decimal(s: &str) -> Option<f64> {
    let caps = DECIMAL_PREFIX_RE.captures(s)?;
    caps.get(1)?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
