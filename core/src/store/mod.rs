// bookshop/src/store/mod.rs

//! The in-process document store: typed collections behind per-collection
//! RwLocks, and the [`Database`] bundle the engine operates on.

pub mod collection;
pub mod database;

pub use collection::{Collection, Document};
pub use database::Database;
