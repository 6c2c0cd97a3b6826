use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{AppState, db, service::SeaOrmMovieService};

pub async fn memory_service_with_db() -> (SeaOrmMovieService, DatabaseConnection) {
    let db = db::connect_and_migrate("sqlite::memory:").await.unwrap();
    (SeaOrmMovieService::new(db.clone()), db)
}

pub async fn memory_service() -> SeaOrmMovieService {
    memory_service_with_db().await.0
}

pub async fn memory_state() -> Arc<AppState> {
    Arc::new(AppState { movies: Arc::new(memory_service().await) })
}
