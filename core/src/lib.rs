// src/lib.rs

//! Bookshop: a document-store backend for an e-commerce book catalog.
//!
//! The crate provides the pieces a REST boundary composes:
//!  - Typed in-process collections with single-call atomic conditional
//!    updates (insert, targeted update, find-and-update, upsert).
//!  - Purchase-history flows that snapshot catalog entries as independent
//!    value records.
//!  - Cart flows that keep one Active cart per owner and one line item per
//!    product, by branching under the collection lock.
//!  - A query facade for list endpoints: filter -> sort -> skip -> limit,
//!    always in that order, with the pre-pagination total alongside.

// Declare modules according to the planned structure
pub mod engine;
pub mod error;
pub mod model;
pub mod query;
pub mod store;

// --- Re-exports for the Public API ---

// Core types callers interact with frequently
pub use crate::error::{EntityKind, Error, Result};
pub use crate::model::{
  Book, Cart, CartStatus, Category, LineItem, NewBook, NewUser, PurchasePatch, PurchaseRecord,
  User, UserPatch,
};
pub use crate::query::{ListQuery, QueryPage};
pub use crate::store::{Collection, Database, Document};
