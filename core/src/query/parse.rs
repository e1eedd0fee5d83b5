// bookshop/src/query/parse.rs

//! Query-string pair parsing, following the query-to-mongo conventions the
//! API speaks: comparison operators spelled inside the pair (`price>=10`,
//! `category=horror`), with `limit`, `offset`/`skip`, `sort`, `fields` and
//! `omit` reserved for pagination, ordering and projection.

use serde_json::Value;
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::query::{Comparator, Condition, ListQuery, Projection, SortKey};

impl ListQuery {
  /// Builds a query from already-decoded `(key, value)` pairs.
  ///
  /// Operator spelling survives form decoding in two shapes: `price>=10`
  /// splits at the first `=` into `("price>", "10")`, while `price>10`
  /// carries no `=` and arrives whole as `("price>10", "")`. Both are
  /// recognized. Values parse as numbers or booleans when they can, strings
  /// otherwise. Repeated filter fields AND together. `limit=0` means no
  /// limit; a later reserved key overrides an earlier one.
  pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self> {
    let mut query = ListQuery::default();
    let mut include: Option<BTreeSet<String>> = None;
    let mut omit: Option<BTreeSet<String>> = None;

    for (key, value) in pairs {
      match key.as_str() {
        "limit" => {
          let parsed = parse_count(key, value)?;
          query.limit = if parsed == 0 { None } else { Some(parsed) };
        }
        "offset" | "skip" => {
          query.skip = parse_count(key, value)?;
        }
        "sort" => {
          query.sort = value
            .split(',')
            .filter(|part| !part.is_empty())
            .map(|part| match part.strip_prefix('-') {
              Some(field) => SortKey {
                field: field.to_string(),
                descending: true,
              },
              None => SortKey {
                field: part.to_string(),
                descending: false,
              },
            })
            .collect();
        }
        "fields" => {
          include = Some(split_fields(value));
        }
        "omit" => {
          omit = Some(split_fields(value));
        }
        _ => {
          query.criteria.conditions.push(parse_condition(key, value));
        }
      }
    }

    // `fields` wins when both projections are given.
    query.projection = match (include, omit) {
      (Some(keep), _) => Projection::Include(keep),
      (None, Some(drop)) => Projection::Omit(drop),
      (None, None) => Projection::All,
    };

    Ok(query)
  }
}

fn parse_condition(key: &str, value: &str) -> Condition {
  if value.is_empty() {
    // A `field>operand` pair without `=` decodes whole into the key.
    if let Some(idx) = key.find(['>', '<']) {
      let (field, rest) = key.split_at(idx);
      let comparator = if rest.starts_with('>') {
        Comparator::Gt
      } else {
        Comparator::Lt
      };
      return Condition {
        field: field.to_string(),
        comparator,
        value: coerce(&rest[1..]),
      };
    }
  }

  // `price>=10` decodes to key `price>`, `price<=10` to `price<`,
  // `title!=Dune` to `title!`.
  let (field, comparator) = if let Some(field) = key.strip_suffix('>') {
    (field, Comparator::Gte)
  } else if let Some(field) = key.strip_suffix('<') {
    (field, Comparator::Lte)
  } else if let Some(field) = key.strip_suffix('!') {
    (field, Comparator::Ne)
  } else {
    (key, Comparator::Eq)
  };

  Condition {
    field: field.to_string(),
    comparator,
    value: coerce(value),
  }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
  value.parse::<usize>().map_err(|_| Error::Validation {
    field: key.into(),
    reason: format!("'{value}' is not a non-negative integer"),
  })
}

fn split_fields(value: &str) -> BTreeSet<String> {
  value
    .split(',')
    .filter(|field| !field.is_empty())
    .map(str::to_string)
    .collect()
}

fn coerce(raw: &str) -> Value {
  if let Ok(int) = raw.parse::<i64>() {
    return Value::from(int);
  }
  if let Ok(float) = raw.parse::<f64>() {
    if let Some(number) = serde_json::Number::from_f64(float) {
      return Value::Number(number);
    }
  }
  match raw {
    "true" => Value::Bool(true),
    "false" => Value::Bool(false),
    _ => Value::String(raw.to_string()),
  }
}
