// bookshop/src/store/database.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::EntityKind;
use crate::model::{Book, Cart, User};
use crate::store::{Collection, Document};

/// The three collections the backend works with. Cloning shares the
/// underlying collections; handing a clone to each request task is the
/// intended usage.
#[derive(Debug, Clone)]
pub struct Database {
  books: Collection<Book>,
  users: Collection<User>,
  carts: Collection<Cart>,
}

impl Database {
  pub fn new() -> Self {
    Database {
      books: Collection::new("books"),
      users: Collection::new("users"),
      carts: Collection::new("carts"),
    }
  }

  pub fn books(&self) -> &Collection<Book> {
    &self.books
  }

  pub fn users(&self) -> &Collection<User> {
    &self.users
  }

  pub fn carts(&self) -> &Collection<Cart> {
    &self.carts
  }
}

impl Default for Database {
  fn default() -> Self {
    Self::new()
  }
}

impl Document for Book {
  const KIND: EntityKind = EntityKind::Book;

  fn id(&self) -> Uuid {
    self.id
  }

  fn touch(&mut self, at: DateTime<Utc>) {
    self.updated_at = at;
  }
}

impl Document for User {
  const KIND: EntityKind = EntityKind::User;

  fn id(&self) -> Uuid {
    self.id
  }

  fn touch(&mut self, at: DateTime<Utc>) {
    self.updated_at = at;
  }
}

impl Document for Cart {
  const KIND: EntityKind = EntityKind::Cart;

  fn id(&self) -> Uuid {
    self.id
  }

  fn touch(&mut self, at: DateTime<Utc>) {
    self.updated_at = at;
  }
}
