// bookshop_app/src/web/pagination.rs
//! Pagination envelope pieces for the book listing: `links` and `totalPages`.
//!
//! Links are rebuilt from the request's own query pairs with the `offset`
//! key replaced, so whatever filters and sort the caller sent survive into
//! the navigation URLs untouched.

use serde_json::{Map, Value};

/// Builds the `links` object for a paginated listing.
///
/// Returns `Value::Null` when the request carried no `limit` (the listing
/// is then a single unbounded page and there is nothing to navigate).
/// Otherwise: `prev`/`first` appear only when the current offset is past
/// the start, `next`/`last` only when documents remain beyond this page.
pub fn page_links(
  base_url: &str,
  path: &str,
  pairs: &[(String, String)],
  skip: usize,
  limit: Option<usize>,
  total: u64,
) -> Value {
  let Some(limit) = limit else {
    return Value::Null;
  };
  // A page larger than the result set behaves like one sized to it; an
  // empty result set has no pages to link at all.
  let per_page = (limit as u64).min(total);
  if per_page == 0 {
    return Value::Null;
  }
  let offset = skip as u64;

  let href = |new_offset: u64| -> Value {
    let mut kept: Vec<(String, String)> = pairs
      .iter()
      .filter(|(key, _)| key != "offset" && key != "skip")
      .cloned()
      .collect();
    kept.push(("offset".to_string(), new_offset.to_string()));
    let query = serde_urlencoded::to_string(&kept).unwrap_or_default();
    Value::String(format!("{}{}?{}", base_url, path, query))
  };

  // Rebuilt offsets never point past the last page, even when the request's
  // own offset already did.
  let pages = (total + per_page - 1) / per_page;
  let last_offset = (pages - 1) * per_page;

  let mut links = Map::new();
  if offset > 0 {
    links.insert(
      "prev".to_string(),
      href(offset.saturating_sub(per_page).min(last_offset)),
    );
    links.insert("first".to_string(), href(0));
  }
  if offset + per_page < total {
    links.insert("next".to_string(), href((offset + per_page).min(last_offset)));
    links.insert("last".to_string(), href(last_offset));
  }
  Value::Object(links)
}

/// `ceil(total / limit)`, or 1 when the listing was unbounded.
pub fn total_pages(total: u64, limit: Option<usize>) -> u64 {
  match limit {
    Some(per_page) if per_page > 0 => {
      let per_page = per_page as u64;
      (total + per_page - 1) / per_page
    }
    _ => 1,
  }
}
