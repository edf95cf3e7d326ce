use axum::Router;
use domain_suppliers::{MongoSupplierRepository, SupplierService};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = MongoSupplierRepository::new(state.db.clone());
    let service = SupplierService::new(repository);

    domain_suppliers::handlers::router(service)
}
