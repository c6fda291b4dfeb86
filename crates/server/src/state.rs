use database::config::CatalogConfig;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub catalog: Arc<CatalogConfig>,
}
