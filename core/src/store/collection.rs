// bookshop/src/store/collection.rs

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{event, Level};
use uuid::Uuid;

use crate::error::{EntityKind, Error, Result};
use crate::query::{ListQuery, QueryPage};

/// Implemented by every type stored in a [`Collection`].
pub trait Document: Clone + Serialize + Send + Sync + 'static {
  /// Entity kind reported in duplicate-insert errors for this collection.
  const KIND: EntityKind;

  fn id(&self) -> Uuid;

  /// Called by the store after every successful write.
  fn touch(&mut self, at: DateTime<Utc>);
}

/// One typed document set behind a single RwLock.
///
/// Every method acquires the lock internally and releases it before
/// returning, so each call is one atomic step against the collection and the
/// compound operations (conditional update, upsert) cannot interleave with
/// one another.
///
/// IMPORTANT: no guard ever crosses an `.await` point; the closures passed
/// to the update methods run synchronously under the lock and must not
/// block.
#[derive(Debug)]
pub struct Collection<T: Document> {
  name: &'static str,
  docs: Arc<RwLock<BTreeMap<Uuid, T>>>,
}

impl<T: Document> Collection<T> {
  pub(crate) fn new(name: &'static str) -> Self {
    Collection {
      name,
      docs: Arc::new(RwLock::new(BTreeMap::new())),
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  /// Inserts a document under its own id. Refuses to overwrite an existing
  /// one.
  pub async fn insert_one(&self, doc: T) -> Result<Uuid> {
    let id = doc.id();
    let mut docs = self.docs.write();
    if docs.contains_key(&id) {
      return Err(Error::Duplicate { kind: T::KIND, id });
    }
    docs.insert(id, doc);
    event!(Level::TRACE, collection = self.name, %id, "document inserted");
    Ok(id)
  }

  pub async fn find_by_id(&self, id: Uuid) -> Option<T> {
    self.docs.read().get(&id).cloned()
  }

  /// First document matching the predicate, in id order.
  pub async fn find_one<P>(&self, pred: P) -> Option<T>
  where
    P: Fn(&T) -> bool,
  {
    self.docs.read().values().find(|doc| pred(doc)).cloned()
  }

  pub async fn find_all(&self) -> Vec<T> {
    self.docs.read().values().cloned().collect()
  }

  pub async fn count(&self) -> usize {
    self.docs.read().len()
  }

  /// Atomically mutates the document with the given id and returns the
  /// updated copy, bumping its `updated_at`. `None` when no such id exists.
  pub async fn update_by_id<F>(&self, id: Uuid, mutate: F) -> Option<T>
  where
    F: FnOnce(&mut T),
  {
    let mut docs = self.docs.write();
    let doc = docs.get_mut(&id)?;
    mutate(doc);
    doc.touch(Utc::now());
    Some(doc.clone())
  }

  /// Targeted fallible update. The closure works on a draft; the draft
  /// replaces the stored document only when the closure returns `Ok`, so a
  /// refused update writes nothing at all.
  ///
  /// Returns `None` when no document has the id, `Some(Err(_))` when the
  /// closure refused, `Some(Ok(updated))` otherwise.
  pub async fn try_update_by_id<F>(&self, id: Uuid, mutate: F) -> Option<Result<T>>
  where
    F: FnOnce(&mut T) -> Result<()>,
  {
    let mut docs = self.docs.write();
    let doc = docs.get_mut(&id)?;
    let mut draft = doc.clone();
    match mutate(&mut draft) {
      Ok(()) => {
        draft.touch(Utc::now());
        *doc = draft;
        Some(Ok(doc.clone()))
      }
      Err(err) => Some(Err(err)),
    }
  }

  /// Atomically mutates the first document matching the predicate (id
  /// order) and returns the updated copy.
  pub async fn find_one_and_update<P, F>(&self, pred: P, mutate: F) -> Option<T>
  where
    P: Fn(&T) -> bool,
    F: FnOnce(&mut T),
  {
    let mut docs = self.docs.write();
    let doc = docs.values_mut().find(|doc| pred(doc))?;
    mutate(doc);
    doc.touch(Utc::now());
    Some(doc.clone())
  }

  /// Find-or-create, then mutate, under one continuous write lock: the
  /// probe and the insert cannot interleave with another upsert on the same
  /// collection, so a predicate meant to be unique (one Active cart per
  /// owner) stays unique.
  ///
  /// A freshly created document keeps `created_at == updated_at`; an
  /// existing one gets touched.
  pub async fn upsert_one<P, I, F>(&self, pred: P, init: I, mutate: F) -> T
  where
    P: Fn(&T) -> bool,
    I: FnOnce() -> T,
    F: FnOnce(&mut T),
  {
    let mut docs = self.docs.write();
    if let Some(doc) = docs.values_mut().find(|doc| pred(doc)) {
      mutate(doc);
      doc.touch(Utc::now());
      return doc.clone();
    }
    let mut doc = init();
    mutate(&mut doc);
    let id = doc.id();
    docs.insert(id, doc.clone());
    event!(Level::TRACE, collection = self.name, %id, "document upserted");
    doc
  }

  /// Removes and returns the document, `None` when absent.
  pub async fn delete_by_id(&self, id: Uuid) -> Option<T> {
    let removed = self.docs.write().remove(&id);
    if removed.is_some() {
      event!(Level::TRACE, collection = self.name, %id, "document deleted");
    }
    removed
  }

  /// Runs a list query against one consistent snapshot of the collection.
  /// Natural (unsorted) order is id order. The snapshot is taken under the
  /// read lock; filtering, sorting and pagination happen after it is
  /// released.
  pub async fn run_query(&self, query: &ListQuery) -> Result<QueryPage> {
    let snapshot: Vec<serde_json::Value> = {
      let docs = self.docs.read();
      let mut values = Vec::with_capacity(docs.len());
      for doc in docs.values() {
        values.push(serde_json::to_value(doc).map_err(anyhow::Error::from)?);
      }
      values
    };
    Ok(query.run(snapshot))
  }
}

impl<T: Document> Clone for Collection<T> {
  fn clone(&self) -> Self {
    Collection {
      name: self.name,
      docs: Arc::clone(&self.docs),
    }
  }
}
