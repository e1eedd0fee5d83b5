// bookshop_app/src/state.rs
use crate::config::AppConfig;
use bookshop::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub db: Database,
  pub config: Arc<AppConfig>, // Share loaded config
}
