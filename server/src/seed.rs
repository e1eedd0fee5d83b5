// bookshop_app/src/seed.rs

//! Optional startup seeding behind the `SEED_DB` flag: a small catalog and a
//! demo user, enough to click through every endpoint.

use anyhow::Result;
use bookshop::{Book, Category, Database, NewBook, NewUser, User};
use uuid::Uuid;

pub async fn seed_database(db: &Database) -> Result<String> {
  if db.books().count().await > 0 {
    return Ok("store already populated, seeding skipped".to_string());
  }

  let catalog = [
    ("B00SEED01", "Dune", 9.99, Category::Fantasy),
    ("B00SEED02", "The Hobbit", 12.5, Category::Fantasy),
    ("B00SEED03", "Dracula", 14.5, Category::Horror),
    ("B00SEED04", "Frankenstein", 11.0, Category::Horror),
    ("B00SEED05", "Persuasion", 7.25, Category::Romance),
    ("B00SEED06", "Jane Eyre", 8.75, Category::Romance),
    ("B00SEED07", "Sapiens", 21.0, Category::History),
    ("B00SEED08", "SPQR", 18.4, Category::History),
  ];

  for (asin, title, price, category) in catalog {
    let book = Book::create(NewBook {
      asin: asin.to_string(),
      title: title.to_string(),
      price,
      category,
      img: format!("https://covers.example.com/{asin}.jpg"),
      authors: vec![Uuid::new_v4()],
    })?;
    db.books().insert_one(book).await?;
  }

  let demo_user = User::create(NewUser {
    first_name: "Demo".to_string(),
    last_name: "Reader".to_string(),
    email: "demo.reader@example.com".to_string(),
  })?;
  db.users().insert_one(demo_user).await?;

  Ok(format!(
    "seeded {} books and 1 user",
    db.books().count().await
  ))
}
