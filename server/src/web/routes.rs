// bookshop_app/src/web/routes.rs

use actix_web::web;

// Simple health check handler function. The store is in-process, so being
// able to answer at all is the whole check.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    // Health Check Route
    .route("/health", web::get().to(health_check_handler))
    // Catalog Routes
    .service(
      web::scope("/books")
        .route(
          "",
          web::post().to(crate::web::handlers::book_handlers::create_book_handler),
        )
        .route(
          "",
          web::get().to(crate::web::handlers::book_handlers::list_books_handler),
        )
        .route(
          "/{book_id}",
          web::get().to(crate::web::handlers::book_handlers::get_book_handler),
        ),
    )
    // User Routes, with purchase history and cart as subresources
    .service(
      web::scope("/users")
        .route(
          "",
          web::post().to(crate::web::handlers::user_handlers::create_user_handler),
        )
        .route(
          "",
          web::get().to(crate::web::handlers::user_handlers::list_users_handler),
        )
        .route(
          "/{user_id}",
          web::get().to(crate::web::handlers::user_handlers::get_user_handler),
        )
        .route(
          "/{user_id}",
          web::put().to(crate::web::handlers::user_handlers::update_user_handler),
        )
        .route(
          "/{user_id}",
          web::delete().to(crate::web::handlers::user_handlers::delete_user_handler),
        )
        // Purchase history subresource
        .route(
          "/{user_id}/purchaseHistory",
          web::post().to(crate::web::handlers::user_handlers::add_purchase_handler),
        )
        .route(
          "/{user_id}/purchaseHistory",
          web::get().to(crate::web::handlers::user_handlers::list_purchase_history_handler),
        )
        .route(
          "/{user_id}/purchaseHistory/{product_id}",
          web::get().to(crate::web::handlers::user_handlers::get_purchase_item_handler),
        )
        .route(
          "/{user_id}/purchaseHistory/{product_id}",
          web::put().to(crate::web::handlers::user_handlers::edit_purchase_item_handler),
        )
        .route(
          "/{user_id}/purchaseHistory/{product_id}",
          web::delete().to(crate::web::handlers::user_handlers::remove_purchase_item_handler),
        )
        // Cart subresource
        .route(
          "/{user_id}/cart",
          web::get().to(crate::web::handlers::cart_handlers::get_cart_handler),
        )
        .route(
          "/{user_id}/cart",
          web::post().to(crate::web::handlers::cart_handlers::add_cart_item_handler),
        )
        .route(
          "/{user_id}/cart/{product_id}",
          web::delete().to(crate::web::handlers::cart_handlers::remove_cart_item_handler),
        ),
    );
}
