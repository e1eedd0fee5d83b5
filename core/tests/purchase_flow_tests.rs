// tests/purchase_flow_tests.rs
mod common; // Reference the common module

use common::*;
use bookshop::engine::{add_purchase, edit_purchase_item, remove_purchase_item};
use bookshop::{EntityKind, Error, PurchasePatch};
use chrono::Utc;
use serial_test::serial;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn test_add_purchase_snapshots_book_under_fresh_id() {
  let fx = fixture().await;
  let before = Utc::now();

  let user = add_purchase(&fx.db, fx.alice.id, fx.dune.id).await.unwrap();

  assert_eq!(user.purchase_history.len(), 1);
  let record = &user.purchase_history[0];
  assert_eq!(record.title, "Dune");
  assert_eq!(record.asin, fx.dune.asin);
  assert_eq!(record.price, fx.dune.price);
  assert_eq!(record.category, fx.dune.category);
  assert_eq!(record.img, fx.dune.img);
  assert_eq!(record.authors, fx.dune.authors);
  // The record has its own identity, never the book's.
  assert_ne!(record.id, fx.dune.id);
  assert!(record.purchase_date >= before);
}

#[tokio::test]
#[serial]
async fn test_add_purchase_twice_appends_two_distinct_records() {
  let fx = fixture().await;

  add_purchase(&fx.db, fx.alice.id, fx.dune.id).await.unwrap();
  let user = add_purchase(&fx.db, fx.alice.id, fx.dune.id).await.unwrap();

  assert_eq!(user.purchase_history.len(), 2);
  assert_ne!(user.purchase_history[0].id, user.purchase_history[1].id);
  assert_eq!(user.purchase_history[0].title, user.purchase_history[1].title);
}

#[tokio::test]
#[serial]
async fn test_add_purchase_unknown_book_leaves_user_unchanged() {
  let fx = fixture().await;

  let err = add_purchase(&fx.db, fx.alice.id, Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(
    err,
    Error::NotFound {
      kind: EntityKind::Book,
      ..
    }
  ));

  let stored = fx.db.users().find_by_id(fx.alice.id).await.unwrap();
  assert!(stored.purchase_history.is_empty());
  assert_eq!(stored.updated_at, fx.alice.updated_at);
}

#[tokio::test]
#[serial]
async fn test_add_purchase_unknown_user_is_not_found() {
  let fx = fixture().await;

  let err = add_purchase(&fx.db, Uuid::new_v4(), fx.dune.id).await.unwrap_err();
  assert!(matches!(
    err,
    Error::NotFound {
      kind: EntityKind::User,
      ..
    }
  ));
}

#[tokio::test]
#[serial]
async fn test_snapshot_survives_later_catalog_change() {
  let fx = fixture().await;

  let user = add_purchase(&fx.db, fx.alice.id, fx.dune.id).await.unwrap();
  let record_id = user.purchase_history[0].id;

  // Reprice the catalog entry behind the snapshot's back.
  fx.db
    .books()
    .update_by_id(fx.dune.id, |book| book.price = 99.0)
    .await
    .unwrap();

  let stored = fx.db.users().find_by_id(fx.alice.id).await.unwrap();
  let record = &stored.purchase_history[0];
  assert_eq!(record.id, record_id);
  assert_eq!(record.price, 9.99);
}

#[tokio::test]
#[serial]
async fn test_edit_purchase_item_patches_only_given_fields() {
  let fx = fixture().await;

  let user = add_purchase(&fx.db, fx.alice.id, fx.dune.id).await.unwrap();
  let original = user.purchase_history[0].clone();

  let patch = PurchasePatch {
    price: Some(12.49),
    ..PurchasePatch::default()
  };
  let updated = edit_purchase_item(&fx.db, fx.alice.id, original.id, patch)
    .await
    .unwrap();

  let record = &updated.purchase_history[0];
  assert_eq!(record.price, 12.49);
  assert_eq!(record.id, original.id);
  assert_eq!(record.title, original.title);
  assert_eq!(record.asin, original.asin);
  assert_eq!(record.purchase_date, original.purchase_date);
}

#[tokio::test]
#[serial]
async fn test_edit_missing_purchase_item_fails_without_writing() {
  let fx = fixture().await;

  let user = add_purchase(&fx.db, fx.alice.id, fx.dune.id).await.unwrap();

  let patch = PurchasePatch {
    title: Some("Retitled".to_string()),
    ..PurchasePatch::default()
  };
  let err = edit_purchase_item(&fx.db, fx.alice.id, Uuid::new_v4(), patch)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::NotFound {
      kind: EntityKind::PurchaseItem,
      ..
    }
  ));

  let stored = fx.db.users().find_by_id(fx.alice.id).await.unwrap();
  assert_eq!(stored.purchase_history[0].title, "Dune");
  // A refused targeted update must not even touch the document.
  assert_eq!(stored.updated_at, user.updated_at);
}

#[tokio::test]
#[serial]
async fn test_edit_purchase_item_unknown_user_is_not_found() {
  let fx = fixture().await;

  let err = edit_purchase_item(&fx.db, Uuid::new_v4(), Uuid::new_v4(), PurchasePatch::default())
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::NotFound {
      kind: EntityKind::User,
      ..
    }
  ));
}

#[tokio::test]
#[serial]
async fn test_edit_purchase_item_rejects_invalid_patch() {
  let fx = fixture().await;

  let user = add_purchase(&fx.db, fx.alice.id, fx.dune.id).await.unwrap();
  let record_id = user.purchase_history[0].id;

  let patch = PurchasePatch {
    price: Some(-1.0),
    ..PurchasePatch::default()
  };
  let err = edit_purchase_item(&fx.db, fx.alice.id, record_id, patch)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Validation { ref field, .. } if field == "price"));
}

#[tokio::test]
#[serial]
async fn test_remove_purchase_item_is_idempotent() {
  let fx = fixture().await;

  let user = add_purchase(&fx.db, fx.alice.id, fx.dune.id).await.unwrap();
  let record_id = user.purchase_history[0].id;

  let after_first = remove_purchase_item(&fx.db, fx.alice.id, record_id).await.unwrap();
  assert!(after_first.purchase_history.is_empty());

  // Pulling the same record again succeeds and changes nothing.
  let after_second = remove_purchase_item(&fx.db, fx.alice.id, record_id).await.unwrap();
  assert!(after_second.purchase_history.is_empty());
}

#[tokio::test]
#[serial]
async fn test_remove_purchase_item_unknown_user_is_not_found() {
  let fx = fixture().await;

  let err = remove_purchase_item(&fx.db, Uuid::new_v4(), Uuid::new_v4())
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::NotFound {
      kind: EntityKind::User,
      ..
    }
  ));
}
