// bookshop/src/engine/purchases.rs

//! Purchase-history mutations: snapshot-append, targeted edit, idempotent
//! removal.
//!
//! A purchase record is a value snapshot. The append copies the book's
//! catalog fields under a fresh id; nothing links the record back to the
//! book, so later catalog changes never reach it. Edits are strict (a
//! missing record is an error and writes nothing), removals are idempotent
//! (pulling an absent record succeeds and changes nothing).

use chrono::Utc;
use tracing::{event, instrument, Level};
use uuid::Uuid;

use crate::error::{EntityKind, Error, Result};
use crate::model::{PurchasePatch, PurchaseRecord, User};
use crate::store::Database;

/// Snapshots the book and appends the record to the user's purchase
/// history. Returns the updated user.
///
/// There is no dedup: buying the same book twice yields two records with
/// distinct ids.
#[instrument(name = "engine::add_purchase", skip(db), err(Display))]
pub async fn add_purchase(db: &Database, user_id: Uuid, book_id: Uuid) -> Result<User> {
  let book = db.books().find_by_id(book_id).await.ok_or(Error::NotFound {
    kind: EntityKind::Book,
    id: book_id,
  })?;

  let record = PurchaseRecord::snapshot_of(&book, Utc::now());
  let record_id = record.id;

  let user = db
    .users()
    .update_by_id(user_id, |user| user.purchase_history.push(record))
    .await
    .ok_or(Error::NotFound {
      kind: EntityKind::User,
      id: user_id,
    })?;

  event!(
    Level::INFO,
    %record_id,
    history_len = user.purchase_history.len(),
    "purchase snapshot appended"
  );
  Ok(user)
}

/// Shallow-merges the patch over one purchase record, located by its own id
/// inside the user's history. The merge runs as a single targeted update
/// under the collection lock; a concurrent edit of a different record can
/// never be lost, and a missing record fails without writing anything.
#[instrument(name = "engine::edit_purchase_item", skip(db, patch), err(Display))]
pub async fn edit_purchase_item(
  db: &Database,
  user_id: Uuid,
  product_id: Uuid,
  patch: PurchasePatch,
) -> Result<User> {
  patch.validate()?;

  let outcome = db
    .users()
    .try_update_by_id(user_id, |user| {
      let record = user
        .purchase_history
        .iter_mut()
        .find(|record| record.id == product_id)
        .ok_or(Error::NotFound {
          kind: EntityKind::PurchaseItem,
          id: product_id,
        })?;
      patch.apply(record);
      Ok(())
    })
    .await;

  match outcome {
    None => Err(Error::NotFound {
      kind: EntityKind::User,
      id: user_id,
    }),
    Some(result) => result,
  }
}

/// Pulls the purchase record with the given id from the user's history.
/// Removing an absent record is a no-op success; only a missing user fails.
#[instrument(name = "engine::remove_purchase_item", skip(db), err(Display))]
pub async fn remove_purchase_item(db: &Database, user_id: Uuid, product_id: Uuid) -> Result<User> {
  let user = db
    .users()
    .update_by_id(user_id, |user| {
      user.purchase_history.retain(|record| record.id != product_id);
    })
    .await
    .ok_or(Error::NotFound {
      kind: EntityKind::User,
      id: user_id,
    })?;

  event!(
    Level::DEBUG,
    history_len = user.purchase_history.len(),
    "purchase record pulled"
  );
  Ok(user)
}
