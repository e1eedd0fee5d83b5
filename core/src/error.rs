// bookshop/src/error.rs
use anyhow::Error as AnyhowError;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// The kind of entity a failed lookup was after. Carried inside
/// [`Error::NotFound`] so the boundary can report which record was missing
/// without string-matching on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
  User,
  Book,
  PurchaseItem,
  Cart,
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      EntityKind::User => "User",
      EntityKind::Book => "Book",
      EntityKind::PurchaseItem => "Purchase record",
      EntityKind::Cart => "Active cart for user",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} with id {id} not found!")]
  NotFound { kind: EntityKind, id: Uuid },

  #[error("Validation failed for field '{field}': {reason}")]
  Validation { field: String, reason: String },

  #[error("{kind} with id {id} already exists")]
  Duplicate { kind: EntityKind, id: Uuid },

  #[error("Store unavailable: {reason}")]
  Unavailable { reason: String },

  #[error("Internal error. Source: {source}")]
  Internal {
    #[source]
    source: AnyhowError,
  },
}

// The conversion offered to embedders whose own failures cross this crate's
// boundary (and used internally for serialization faults in the store).
impl From<AnyhowError> for Error {
  fn from(err: AnyhowError) -> Self {
    Error::Internal { source: err }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
