// bookshop_app/src/web/handlers/book_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::pagination;
use bookshop::{Book, EntityKind, Error as StoreError, ListQuery, NewBook};

#[instrument(name = "handler::create_book", skip(app_state, payload))]
pub async fn create_book_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<NewBook>,
) -> Result<HttpResponse, AppError> {
  let book = Book::create(payload.into_inner())?;
  let book_id = app_state.db.books().insert_one(book).await?;

  info!(book_id = %book_id, "Book added to catalog.");
  Ok(HttpResponse::Created().json(json!({ "_id": book_id })))
}

/// Listing endpoint. The query string is decoded to raw pairs first so the
/// comparison operators riding inside keys (`price>=10` arrives as the pair
/// `("price>", "10")`) reach the facade parser intact; a typed extractor
/// would swallow them.
#[instrument(name = "handler::list_books", skip(app_state, req))]
pub async fn list_books_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
) -> Result<HttpResponse, AppError> {
  let pairs: Vec<(String, String)> = serde_urlencoded::from_str(req.query_string())
    .map_err(|e| AppError::Validation(format!("Malformed query string: {}", e)))?;

  let query = ListQuery::from_pairs(&pairs)?;
  let page = app_state.db.books().run_query(&query).await?;

  debug!(
    total = page.total,
    returned = page.items.len(),
    "Book listing evaluated."
  );

  let links = pagination::page_links(
    &app_state.config.app_base_url,
    "/books",
    &pairs,
    query.skip,
    query.limit,
    page.total,
  );
  Ok(HttpResponse::Ok().json(json!({
    "links": links,
    "total": page.total,
    "totalPages": pagination::total_pages(page.total, query.limit),
    "books": page.items,
  })))
}

#[instrument(name = "handler::get_book", skip(app_state, path), fields(book_id = %path.as_ref()))]
pub async fn get_book_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let book_id = path.into_inner();

  let book = app_state
    .db
    .books()
    .find_by_id(book_id)
    .await
    .ok_or(StoreError::NotFound {
      kind: EntityKind::Book,
      id: book_id,
    })?;

  Ok(HttpResponse::Ok().json(book))
}
