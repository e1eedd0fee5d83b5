// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use bookshop::{Book, Category, Database, NewBook, NewUser, User};
use once_cell::sync::Lazy;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixture payload builders ---

pub fn sample_book(asin: &str, title: &str, price: f64, category: Category) -> NewBook {
  NewBook {
    asin: asin.to_string(),
    title: title.to_string(),
    price,
    category,
    img: format!("https://covers.example.com/{asin}.jpg"),
    authors: Vec::new(),
  }
}

pub fn sample_user(first_name: &str, last_name: &str) -> NewUser {
  NewUser {
    first_name: first_name.to_string(),
    last_name: last_name.to_string(),
    email: format!(
      "{}.{}@example.com",
      first_name.to_lowercase(),
      last_name.to_lowercase()
    ),
  }
}

// --- Seeded database fixture shared by the flow tests ---

pub struct Fixture {
  pub db: Database,
  pub alice: User,
  pub bob: User,
  pub dune: Book,
  pub dracula: Book,
  pub persuasion: Book,
  pub sapiens: Book,
}

/// Two users and four books, one per category. Prices are distinct so the
/// query tests can cut the set with inequalities.
pub async fn fixture() -> Fixture {
  setup_tracing();
  let db = Database::new();

  let alice = insert_user(&db, sample_user("Alice", "Archer")).await;
  let bob = insert_user(&db, sample_user("Bob", "Baker")).await;

  let dune = insert_book(&db, sample_book("B000R02", "Dune", 9.99, Category::Fantasy)).await;
  let dracula = insert_book(&db, sample_book("B000H13", "Dracula", 14.5, Category::Horror)).await;
  let persuasion =
    insert_book(&db, sample_book("B000R77", "Persuasion", 7.25, Category::Romance)).await;
  let sapiens = insert_book(&db, sample_book("B000H01", "Sapiens", 21.0, Category::History)).await;

  Fixture {
    db,
    alice,
    bob,
    dune,
    dracula,
    persuasion,
    sapiens,
  }
}

pub async fn insert_book(db: &Database, new: NewBook) -> Book {
  let book = Book::create(new).unwrap();
  db.books().insert_one(book.clone()).await.unwrap();
  book
}

pub async fn insert_user(db: &Database, new: NewUser) -> User {
  let user = User::create(new).unwrap();
  db.users().insert_one(user.clone()).await.unwrap();
  user
}
