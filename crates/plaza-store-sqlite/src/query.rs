//! Translation of core [`Filter`]s into a parameterised SQL `WHERE` clause.
//!
//! Column names come from the closed [`Field`] enum, never from user input;
//! every value is bound as a parameter.

use plaza_core::filter::{Direction, Field, Filter, FilterValue, Operator, Scalar};
use rusqlite::types::Value;

use crate::encode::encode_bool;

/// A `WHERE ...` fragment (possibly empty) and its positional parameters.
#[derive(Debug, Default)]
pub struct WhereClause {
  pub sql:    String,
  pub params: Vec<Value>,
}

fn bind(s: &Scalar) -> Value {
  match s {
    Scalar::Bool(b) => Value::Integer(encode_bool(*b)),
    Scalar::Text(t) => Value::Text(t.clone()),
  }
}

/// Conjunction of all `filters`.
pub fn where_clause(filters: &[Filter]) -> WhereClause {
  let mut conds: Vec<String> = Vec::with_capacity(filters.len());
  let mut params = Vec::new();

  for f in filters {
    let column = f.field.as_str();
    match (f.operator, &f.value) {
      (Operator::Eq, FilterValue::Scalar(v)) if f.field.accepts(v) => {
        conds.push(format!("{column} = ?"));
        params.push(bind(v));
      }
      (Operator::In, FilterValue::List(vs)) => {
        // Column affinity would coerce '0' to 0, so mistyped candidates are
        // dropped here rather than left to SQLite.
        let vs: Vec<&Scalar> = vs.iter().filter(|v| f.field.accepts(v)).collect();
        if vs.is_empty() {
          conds.push("0".to_owned());
          continue;
        }
        let marks = vec!["?"; vs.len()].join(", ");
        conds.push(format!("{column} IN ({marks})"));
        params.extend(vs.into_iter().map(bind));
      }
      // Mistyped scalar or a shape mismatch: matches nothing, as in memory.
      _ => conds.push("0".to_owned()),
    }
  }

  let sql = if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  };
  WhereClause { sql, params }
}

pub fn order_clause(field: Field, direction: Direction) -> String {
  let dir = match direction {
    Direction::Asc => "ASC",
    Direction::Desc => "DESC",
  };
  format!("ORDER BY {} {dir}", field.as_str())
}
