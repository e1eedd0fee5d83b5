// bookshop/src/model/book.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Catalog shelf a book is filed under. The wire form is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  History,
  Horror,
  Romance,
  Fantasy,
}

/// A catalog entry. Books are created once and never edited in place;
/// purchase records copy their fields instead of referencing them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
  #[serde(rename = "_id")]
  pub id: Uuid,
  pub asin: String,
  pub title: String,
  pub price: f64,
  pub category: Category,
  pub img: String,
  pub authors: Vec<Uuid>, // References to the external Author entity; stored opaque, never joined
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Request payload for adding a book to the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
  pub asin: String,
  pub title: String,
  pub price: f64,
  pub category: Category,
  pub img: String,
  #[serde(default)]
  pub authors: Vec<Uuid>,
}

impl NewBook {
  pub fn validate(&self) -> Result<()> {
    require_non_empty("asin", &self.asin)?;
    require_non_empty("title", &self.title)?;
    require_non_empty("img", &self.img)?;
    validate_price(self.price)?;
    Ok(())
  }
}

impl Book {
  /// Validates the payload and mints the stored document. `created_at`
  /// equals `updated_at` until the first write touches the record.
  pub fn create(new: NewBook) -> Result<Book> {
    new.validate()?;
    let now = Utc::now();
    Ok(Book {
      id: Uuid::new_v4(),
      asin: new.asin,
      title: new.title,
      price: new.price,
      category: new.category,
      img: new.img,
      authors: new.authors,
      created_at: now,
      updated_at: now,
    })
  }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::Validation {
      field: field.into(),
      reason: "must not be empty".into(),
    });
  }
  Ok(())
}

pub(crate) fn validate_price(price: f64) -> Result<()> {
  if !price.is_finite() || price < 0.0 {
    return Err(Error::Validation {
      field: "price".into(),
      reason: "must be a finite, non-negative number".into(),
    });
  }
  Ok(())
}
