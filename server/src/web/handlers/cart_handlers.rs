// bookshop_app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use bookshop::engine;

// --- Request DTO ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
  pub book_id: Uuid,
  pub quantity: u32,
}

// --- Handler Implementations ---

#[instrument(name = "handler::get_cart", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let cart = engine::active_cart(&app_state.db, user_id).await?;
  Ok(HttpResponse::Ok().json(cart))
}

#[instrument(
  name = "handler::add_cart_item",
  skip(app_state, path, payload),
  fields(user_id = %path.as_ref(), book_id = %payload.book_id, quantity = %payload.quantity)
)]
pub async fn add_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let cart =
    engine::add_cart_item(&app_state.db, user_id, payload.book_id, payload.quantity).await?;

  info!(
    cart_id = %cart.id,
    lines = cart.products.len(),
    "Cart updated."
  );
  Ok(HttpResponse::Ok().json(cart))
}

#[instrument(name = "handler::remove_cart_item", skip(app_state, path))]
pub async fn remove_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let (user_id, product_id) = path.into_inner();
  let cart = engine::remove_cart_item(&app_state.db, user_id, product_id).await?;
  Ok(HttpResponse::Ok().json(cart))
}
