// bookshop/src/query/mod.rs

//! The query facade for list endpoints.
//!
//! A [`ListQuery`] is built from decoded query-string pairs (see
//! [`ListQuery::from_pairs`]) and evaluated against a snapshot of one
//! collection. Evaluation order is fixed regardless of how the request
//! spelled its pairs:
//!
//!   filter -> sort -> skip -> limit
//!
//! `total` always counts the filtered set before skip/limit, so pagination
//! controls can never change it. Projection applies to the returned page
//! only.

pub mod parse;

use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone)]
pub struct QueryPage {
  pub items: Vec<Value>,
  pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
  Eq,
  Ne,
  Gt,
  Gte,
  Lt,
  Lte,
}

/// A single filter condition on a (possibly dotted) field path.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
  pub field: String,
  pub comparator: Comparator,
  pub value: Value,
}

/// Conjunction of conditions; a document matches when every condition does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
  pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
  pub field: String,
  pub descending: bool,
}

/// Field projection for the returned page. Include mode always keeps `_id`,
/// matching the document-store convention. Paths are top-level keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
  #[default]
  All,
  Include(BTreeSet<String>),
  Omit(BTreeSet<String>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
  pub criteria: Criteria,
  pub sort: Vec<SortKey>,
  pub projection: Projection,
  pub skip: usize,
  pub limit: Option<usize>,
}

impl ListQuery {
  /// Evaluates the query over a document snapshot. The sort is stable, so
  /// documents equal under every sort key keep their natural (id) order.
  pub fn run(&self, docs: Vec<Value>) -> QueryPage {
    let mut matched: Vec<Value> = docs
      .into_iter()
      .filter(|doc| self.criteria.matches(doc))
      .collect();

    if !self.sort.is_empty() {
      matched.sort_by(|a, b| self.compare_docs(a, b));
    }

    let total = matched.len() as u64;
    let items: Vec<Value> = matched
      .into_iter()
      .skip(self.skip)
      .take(self.limit.unwrap_or(usize::MAX))
      .map(|doc| self.projection.apply(doc))
      .collect();

    QueryPage { items, total }
  }

  fn compare_docs(&self, a: &Value, b: &Value) -> Ordering {
    for key in &self.sort {
      let left = lookup(a, &key.field);
      let right = lookup(b, &key.field);
      // Missing fields sort first ascending.
      let ord = match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(l), Some(r)) => compare_values(l, r),
      };
      let ord = if key.descending { ord.reverse() } else { ord };
      if ord != Ordering::Equal {
        return ord;
      }
    }
    Ordering::Equal
  }
}

impl Criteria {
  pub fn is_empty(&self) -> bool {
    self.conditions.is_empty()
  }

  pub fn matches(&self, doc: &Value) -> bool {
    self.conditions.iter().all(|cond| cond.matches(doc))
  }
}

impl Condition {
  /// Equality is type-loose across number representations (10 == 10.0) and
  /// strict otherwise. Ordering comparators match only number-against-number
  /// or string-against-string; a missing field matches nothing but `Ne`.
  pub fn matches(&self, doc: &Value) -> bool {
    let field = lookup(doc, &self.field);
    match self.comparator {
      Comparator::Eq => field.is_some_and(|v| values_equal(v, &self.value)),
      Comparator::Ne => !field.is_some_and(|v| values_equal(v, &self.value)),
      Comparator::Gt => field.is_some_and(|v| ordered(v, &self.value, Ordering::Greater, false)),
      Comparator::Gte => field.is_some_and(|v| ordered(v, &self.value, Ordering::Greater, true)),
      Comparator::Lt => field.is_some_and(|v| ordered(v, &self.value, Ordering::Less, false)),
      Comparator::Lte => field.is_some_and(|v| ordered(v, &self.value, Ordering::Less, true)),
    }
  }
}

impl Projection {
  pub fn apply(&self, doc: Value) -> Value {
    let Value::Object(map) = doc else {
      return doc;
    };
    match self {
      Projection::All => Value::Object(map),
      Projection::Include(keep) => {
        let projected: Map<String, Value> = map
          .into_iter()
          .filter(|(key, _)| key == "_id" || keep.contains(key))
          .collect();
        Value::Object(projected)
      }
      Projection::Omit(drop) => {
        let projected: Map<String, Value> = map
          .into_iter()
          .filter(|(key, _)| !drop.contains(key))
          .collect();
        Value::Object(projected)
      }
    }
  }
}

/// Resolves a dotted path (`"owner"`, `"profile.email"`) inside a document.
fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
  let mut current = doc;
  for segment in path.split('.') {
    current = current.as_object()?.get(segment)?;
  }
  Some(current)
}

fn values_equal(a: &Value, b: &Value) -> bool {
  match (a.as_f64(), b.as_f64()) {
    (Some(l), Some(r)) => l == r,
    _ => a == b,
  }
}

/// True when `a` relates to `b` as `wanted` (or equals it, with
/// `or_equal`). Comparable pairs are number/number and string/string.
fn ordered(a: &Value, b: &Value, wanted: Ordering, or_equal: bool) -> bool {
  let ord = match (a, b) {
    (Value::String(l), Value::String(r)) => l.cmp(r),
    _ => match (a.as_f64(), b.as_f64()) {
      (Some(l), Some(r)) => match l.partial_cmp(&r) {
        Some(ord) => ord,
        None => return false,
      },
      _ => return false,
    },
  };
  ord == wanted || (or_equal && ord == Ordering::Equal)
}

/// Total order over JSON values used by the sort phase: null, then bools,
/// then numbers, then strings, then arrays/objects (by rendered form, as a
/// last resort for stability).
fn compare_values(a: &Value, b: &Value) -> Ordering {
  fn rank(v: &Value) -> u8 {
    match v {
      Value::Null => 0,
      Value::Bool(_) => 1,
      Value::Number(_) => 2,
      Value::String(_) => 3,
      Value::Array(_) => 4,
      Value::Object(_) => 5,
    }
  }

  match (a, b) {
    (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
    (Value::Number(_), Value::Number(_)) => {
      let l = a.as_f64().unwrap_or(f64::NAN);
      let r = b.as_f64().unwrap_or(f64::NAN);
      l.partial_cmp(&r).unwrap_or(Ordering::Equal)
    }
    (Value::String(l), Value::String(r)) => l.cmp(r),
    _ if rank(a) != rank(b) => rank(a).cmp(&rank(b)),
    _ => a.to_string().cmp(&b.to_string()),
  }
}
