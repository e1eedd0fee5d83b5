// bookshop/src/engine/mod.rs

//! The mutation engine: the conditional-update flows behind the purchase
//! history and shopping cart endpoints. Every operation here is one or more
//! single-document atomic steps against the store; there is no cross-document
//! transaction, no compensation and no internal retry. Failures surface to
//! the caller as [`crate::error::Error`].

pub mod carts;
pub mod purchases;

pub use carts::{active_cart, add_cart_item, remove_cart_item};
pub use purchases::{add_purchase, edit_purchase_item, remove_purchase_item};
