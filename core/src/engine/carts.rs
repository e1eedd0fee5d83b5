// bookshop/src/engine/carts.rs

//! Shopping-cart mutations over the carts collection.
//!
//! Both write flows go through the store's upsert, whose probe and insert
//! share one write lock. That single fact carries both invariants: at most
//! one Active cart per owner, and at most one line item per product within
//! it (the increment-vs-append branch is chosen under the same lock).

use chrono::Utc;
use tracing::{event, instrument, Level};
use uuid::Uuid;

use crate::error::{EntityKind, Error, Result};
use crate::model::{Cart, CartStatus, LineItem};
use crate::store::Database;

/// Adds `quantity` of a book to the user's Active cart.
///
/// If the cart already carries the book the quantity is incremented
/// (saturating at `u32::MAX`); if not the line item is appended; if the user
/// has no Active cart at all one is created around the line item. All three
/// outcomes are decided inside one atomic upsert.
#[instrument(name = "engine::add_cart_item", skip(db), err(Display))]
pub async fn add_cart_item(
  db: &Database,
  user_id: Uuid,
  book_id: Uuid,
  quantity: u32,
) -> Result<Cart> {
  if quantity == 0 {
    return Err(Error::Validation {
      field: "quantity".into(),
      reason: "must be a positive integer".into(),
    });
  }
  ensure_user_exists(db, user_id).await?;
  if db.books().find_by_id(book_id).await.is_none() {
    return Err(Error::NotFound {
      kind: EntityKind::Book,
      id: book_id,
    });
  }

  let cart = db
    .carts()
    .upsert_one(
      |cart| cart.owner == user_id && cart.status == CartStatus::Active,
      || Cart::new_active(user_id, Utc::now()),
      |cart| {
        match cart
          .products
          .iter_mut()
          .find(|item| item.product_id == book_id)
        {
          Some(item) => item.quantity = item.quantity.saturating_add(quantity),
          None => cart.products.push(LineItem {
            product_id: book_id,
            quantity,
          }),
        }
      },
    )
    .await;

  event!(
    Level::INFO,
    cart_id = %cart.id,
    items = cart.products.len(),
    "cart line item added"
  );
  Ok(cart)
}

/// Pulls the line item with `product_id` from the user's Active cart.
///
/// Fails only when the user record itself is absent. Pulling a product the
/// cart does not carry is a silent no-op; a user without an Active cart gets
/// an empty one materialized by the upsert, so the call always returns the
/// (possibly empty) Active cart.
#[instrument(name = "engine::remove_cart_item", skip(db), err(Display))]
pub async fn remove_cart_item(db: &Database, user_id: Uuid, product_id: Uuid) -> Result<Cart> {
  ensure_user_exists(db, user_id).await?;

  let cart = db
    .carts()
    .upsert_one(
      |cart| cart.owner == user_id && cart.status == CartStatus::Active,
      || Cart::new_active(user_id, Utc::now()),
      |cart| cart.products.retain(|item| item.product_id != product_id),
    )
    .await;

  event!(
    Level::DEBUG,
    cart_id = %cart.id,
    items = cart.products.len(),
    "cart line item pulled"
  );
  Ok(cart)
}

/// The user's current Active cart.
#[instrument(name = "engine::active_cart", skip(db), err(Display))]
pub async fn active_cart(db: &Database, user_id: Uuid) -> Result<Cart> {
  ensure_user_exists(db, user_id).await?;

  db.carts()
    .find_one(|cart| cart.owner == user_id && cart.status == CartStatus::Active)
    .await
    .ok_or(Error::NotFound {
      kind: EntityKind::Cart,
      id: user_id,
    })
}

async fn ensure_user_exists(db: &Database, user_id: Uuid) -> Result<()> {
  if db.users().find_by_id(user_id).await.is_none() {
    return Err(Error::NotFound {
      kind: EntityKind::User,
      id: user_id,
    });
  }
  Ok(())
}
