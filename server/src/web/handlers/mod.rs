// bookshop_app/src/web/handlers/mod.rs

// Declare handler modules
pub mod book_handlers;
pub mod cart_handlers;
pub mod user_handlers;

// routes.rs reaches handler functions through their module path
// (e.g. book_handlers::create_book_handler).
