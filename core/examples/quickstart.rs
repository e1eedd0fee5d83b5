// bookshop/examples/quickstart.rs

use bookshop::engine::{add_cart_item, add_purchase, remove_cart_item};
use bookshop::{Book, Category, Database, Error, ListQuery, NewBook, NewUser, User};
use tracing::info;

// A seeded store, a purchase, a cart round trip and a catalog query, end to
// end. Run with `cargo run --example quickstart`.

#[tokio::main]
async fn main() -> Result<(), Error> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Bookshop Quickstart ---");

  let db = Database::new();

  // 1. Put a couple of books on the shelf.
  let dune = Book::create(NewBook {
    asin: "B000R02".to_string(),
    title: "Dune".to_string(),
    price: 9.99,
    category: Category::Fantasy,
    img: "https://covers.example.com/B000R02.jpg".to_string(),
    authors: Vec::new(),
  })?;
  let dracula = Book::create(NewBook {
    asin: "B000H13".to_string(),
    title: "Dracula".to_string(),
    price: 14.5,
    category: Category::Horror,
    img: "https://covers.example.com/B000H13.jpg".to_string(),
    authors: Vec::new(),
  })?;
  db.books().insert_one(dune.clone()).await?;
  db.books().insert_one(dracula.clone()).await?;

  // 2. Register a user.
  let alice = User::create(NewUser {
    first_name: "Alice".to_string(),
    last_name: "Archer".to_string(),
    email: "alice@example.com".to_string(),
  })?;
  let user_id = db.users().insert_one(alice).await?;

  // 3. Record a purchase: the history entry is a snapshot with its own id.
  let user = add_purchase(&db, user_id, dune.id).await?;
  let record = &user.purchase_history[0];
  info!(
    "Purchased '{}' for {} (record id {}, book id {})",
    record.title, record.price, record.id, dune.id
  );
  assert_ne!(record.id, dune.id);

  // 4. Cart round trip: same book twice merges into one line item.
  add_cart_item(&db, user_id, dracula.id, 1).await?;
  let cart = add_cart_item(&db, user_id, dracula.id, 2).await?;
  info!(
    "Cart {} now holds {} line(s); first quantity = {}",
    cart.id,
    cart.products.len(),
    cart.products[0].quantity
  );
  assert_eq!(cart.products.len(), 1);
  assert_eq!(cart.products[0].quantity, 3);

  let cart = remove_cart_item(&db, user_id, dracula.id).await?;
  assert!(cart.products.is_empty());

  // 5. Query the catalog the way a list endpoint would.
  let query = ListQuery::from_pairs(&[
    ("price>".to_string(), "9".to_string()),
    ("sort".to_string(), "-price".to_string()),
    ("limit".to_string(), "10".to_string()),
  ])?;
  let page = db.books().run_query(&query).await?;
  info!("Catalog query matched {} book(s)", page.total);
  for item in &page.items {
    info!("- {} at {}", item["title"], item["price"]);
  }
  assert_eq!(page.total, 2);

  Ok(())
}
