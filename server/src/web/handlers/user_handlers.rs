// bookshop_app/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use bookshop::engine;
use bookshop::{EntityKind, Error as StoreError, NewUser, PurchasePatch, User, UserPatch};

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddPurchaseRequest {
  pub book_id: Uuid,
}

// --- Profile handlers ---

#[instrument(name = "handler::create_user", skip(app_state, payload))]
pub async fn create_user_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
  let user = User::create(payload.into_inner())?;
  let user_id = app_state.db.users().insert_one(user).await?;

  info!(user_id = %user_id, "User registered.");
  Ok(HttpResponse::Created().json(json!({ "_id": user_id })))
}

#[instrument(name = "handler::list_users", skip(app_state))]
pub async fn list_users_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let users = app_state.db.users().find_all().await;
  Ok(HttpResponse::Ok().json(users))
}

#[instrument(name = "handler::get_user", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn get_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let user = find_user(&app_state, user_id).await?;
  Ok(HttpResponse::Ok().json(user))
}

#[instrument(name = "handler::update_user", skip(app_state, path, payload), fields(user_id = %path.as_ref()))]
pub async fn update_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<UserPatch>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let patch = payload.into_inner();
  patch.validate()?;

  let user = app_state
    .db
    .users()
    .update_by_id(user_id, |user| user.apply_profile(patch))
    .await
    .ok_or(StoreError::NotFound {
      kind: EntityKind::User,
      id: user_id,
    })?;

  Ok(HttpResponse::Ok().json(user))
}

#[instrument(name = "handler::delete_user", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn delete_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();

  match app_state.db.users().delete_by_id(user_id).await {
    Some(_) => {
      info!(user_id = %user_id, "User deleted.");
      Ok(HttpResponse::NoContent().finish())
    }
    None => Err(
      StoreError::NotFound {
        kind: EntityKind::User,
        id: user_id,
      }
      .into(),
    ),
  }
}

// --- Purchase history handlers ---

#[instrument(name = "handler::add_purchase", skip(app_state, path, payload), fields(user_id = %path.as_ref()))]
pub async fn add_purchase_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<AddPurchaseRequest>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let user = engine::add_purchase(&app_state.db, user_id, payload.book_id).await?;
  Ok(HttpResponse::Ok().json(user))
}

#[instrument(name = "handler::list_purchase_history", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn list_purchase_history_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let user = find_user(&app_state, user_id).await?;
  Ok(HttpResponse::Ok().json(user.purchase_history))
}

#[instrument(name = "handler::get_purchase_item", skip(app_state, path))]
pub async fn get_purchase_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let (user_id, product_id) = path.into_inner();
  let user = find_user(&app_state, user_id).await?;

  let record = user
    .purchase_history
    .into_iter()
    .find(|record| record.id == product_id)
    .ok_or(StoreError::NotFound {
      kind: EntityKind::PurchaseItem,
      id: product_id,
    })?;

  Ok(HttpResponse::Ok().json(record))
}

#[instrument(name = "handler::edit_purchase_item", skip(app_state, path, payload))]
pub async fn edit_purchase_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(Uuid, Uuid)>,
  payload: web::Json<PurchasePatch>,
) -> Result<HttpResponse, AppError> {
  let (user_id, product_id) = path.into_inner();
  let user =
    engine::edit_purchase_item(&app_state.db, user_id, product_id, payload.into_inner()).await?;
  Ok(HttpResponse::Ok().json(user))
}

#[instrument(name = "handler::remove_purchase_item", skip(app_state, path))]
pub async fn remove_purchase_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let (user_id, product_id) = path.into_inner();
  let user = engine::remove_purchase_item(&app_state.db, user_id, product_id).await?;
  Ok(HttpResponse::Ok().json(user))
}

// --- Shared lookup ---

async fn find_user(app_state: &web::Data<AppState>, user_id: Uuid) -> Result<User, AppError> {
  app_state
    .db
    .users()
    .find_by_id(user_id)
    .await
    .ok_or_else(|| {
      StoreError::NotFound {
        kind: EntityKind::User,
        id: user_id,
      }
      .into()
    })
}
