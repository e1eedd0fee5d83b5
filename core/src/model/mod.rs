// bookshop/src/model/mod.rs

//! Data structures representing store documents and their creation/patch
//! payloads.

// Declare child modules for each document family
pub mod book;
pub mod cart;
pub mod user;

// Re-export the model structs for convenient access
pub use book::{Book, Category, NewBook};
pub use cart::{Cart, CartStatus, LineItem};
pub use user::{NewUser, PurchasePatch, PurchaseRecord, User, UserPatch};
