// bookshop/src/model/cart.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Only `Active` carts are manipulated here; checkout flips a cart to
/// `Completed`, after which the mutation flows ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartStatus {
  Active,
  Completed,
}

/// One product line inside a cart. `product_id` is unique within a cart;
/// adding the same book again increments `quantity` instead of appending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
  pub product_id: Uuid,
  pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
  #[serde(rename = "_id")]
  pub id: Uuid,
  pub owner: Uuid,
  pub status: CartStatus,
  #[serde(default)]
  pub products: Vec<LineItem>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Cart {
  /// An empty Active cart for `owner`. Carts are only ever materialized
  /// through the store's upsert, which guarantees at most one Active cart
  /// per owner.
  pub fn new_active(owner: Uuid, at: DateTime<Utc>) -> Cart {
    Cart {
      id: Uuid::new_v4(),
      owner,
      status: CartStatus::Active,
      products: Vec::new(),
      created_at: at,
      updated_at: at,
    }
  }
}
