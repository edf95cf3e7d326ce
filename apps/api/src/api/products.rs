use axum::Router;
use domain_categories::MongoCategoryRepository;
use domain_products::{MongoProductRepository, ProductService};
use domain_suppliers::MongoSupplierRepository;
use std::sync::Arc;

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let categories = Arc::new(MongoCategoryRepository::new(state.db.clone()));
    let suppliers = Arc::new(MongoSupplierRepository::new(state.db.clone()));

    let service = ProductService::new(repository, categories, suppliers, state.storage.clone());

    domain_products::handlers::router(service)
}
