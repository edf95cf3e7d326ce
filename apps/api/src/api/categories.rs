use axum::Router;
use domain_categories::{CategoryService, MongoCategoryRepository};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = MongoCategoryRepository::new(state.db.clone());
    let service = CategoryService::new(repository);

    domain_categories::handlers::router(service)
}
