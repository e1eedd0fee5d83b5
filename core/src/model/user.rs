// bookshop/src/model/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::model::book::{require_non_empty, validate_price, Book, Category};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  #[serde(rename = "_id")]
  pub id: Uuid,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  #[serde(default)]
  pub purchase_history: Vec<PurchaseRecord>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Request payload for registering a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
}

/// Partial profile update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  pub email: Option<String>,
}

/// One entry of a user's purchase history: a value snapshot of the book at
/// purchase time under its own identity. Later catalog changes never reach
/// it, and its id is minted fresh, never the book's.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
  #[serde(rename = "_id")]
  pub id: Uuid,
  pub asin: String,
  pub title: String,
  pub price: f64,
  pub category: Category,
  pub img: String,
  pub authors: Vec<Uuid>,
  pub purchase_date: DateTime<Utc>,
}

/// Partial update for one purchase record. The identity is deliberately
/// absent: a patch can rewrite what was bought, not which entry it is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePatch {
  pub asin: Option<String>,
  pub title: Option<String>,
  pub price: Option<f64>,
  pub category: Option<Category>,
  pub img: Option<String>,
  pub authors: Option<Vec<Uuid>>,
  pub purchase_date: Option<DateTime<Utc>>,
}

impl NewUser {
  pub fn validate(&self) -> Result<()> {
    require_non_empty("firstName", &self.first_name)?;
    require_non_empty("lastName", &self.last_name)?;
    validate_email(&self.email)?;
    Ok(())
  }
}

impl User {
  pub fn create(new: NewUser) -> Result<User> {
    new.validate()?;
    let now = Utc::now();
    Ok(User {
      id: Uuid::new_v4(),
      first_name: new.first_name,
      last_name: new.last_name,
      email: new.email,
      purchase_history: Vec::new(),
      created_at: now,
      updated_at: now,
    })
  }

  /// Shallow-merges a validated profile patch over the profile fields.
  pub fn apply_profile(&mut self, patch: UserPatch) {
    if let Some(first_name) = patch.first_name {
      self.first_name = first_name;
    }
    if let Some(last_name) = patch.last_name {
      self.last_name = last_name;
    }
    if let Some(email) = patch.email {
      self.email = email;
    }
  }
}

impl UserPatch {
  pub fn validate(&self) -> Result<()> {
    if let Some(first_name) = &self.first_name {
      require_non_empty("firstName", first_name)?;
    }
    if let Some(last_name) = &self.last_name {
      require_non_empty("lastName", last_name)?;
    }
    if let Some(email) = &self.email {
      validate_email(email)?;
    }
    Ok(())
  }
}

impl PurchaseRecord {
  /// Copies every catalog field of `book` into a new record with a fresh id
  /// and the given purchase date.
  pub fn snapshot_of(book: &Book, purchase_date: DateTime<Utc>) -> PurchaseRecord {
    PurchaseRecord {
      id: Uuid::new_v4(),
      asin: book.asin.clone(),
      title: book.title.clone(),
      price: book.price,
      category: book.category,
      img: book.img.clone(),
      authors: book.authors.clone(),
      purchase_date,
    }
  }
}

impl PurchasePatch {
  pub fn validate(&self) -> Result<()> {
    if let Some(asin) = &self.asin {
      require_non_empty("asin", asin)?;
    }
    if let Some(title) = &self.title {
      require_non_empty("title", title)?;
    }
    if let Some(img) = &self.img {
      require_non_empty("img", img)?;
    }
    if let Some(price) = self.price {
      validate_price(price)?;
    }
    Ok(())
  }

  /// Fields present in the patch win; everything else keeps its stored
  /// value. The record's id is never touched.
  pub fn apply(&self, record: &mut PurchaseRecord) {
    if let Some(asin) = &self.asin {
      record.asin = asin.clone();
    }
    if let Some(title) = &self.title {
      record.title = title.clone();
    }
    if let Some(price) = self.price {
      record.price = price;
    }
    if let Some(category) = self.category {
      record.category = category;
    }
    if let Some(img) = &self.img {
      record.img = img.clone();
    }
    if let Some(authors) = &self.authors {
      record.authors = authors.clone();
    }
    if let Some(purchase_date) = self.purchase_date {
      record.purchase_date = purchase_date;
    }
  }
}

fn validate_email(email: &str) -> Result<()> {
  require_non_empty("email", email)?;
  if !email.contains('@') {
    return Err(crate::error::Error::Validation {
      field: "email".into(),
      reason: "must contain '@'".into(),
    });
  }
  Ok(())
}
