use axum::Router;
use domain_customers::{CustomerService, MongoCustomerRepository};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = MongoCustomerRepository::new(state.db.clone());
    let service = CustomerService::new(repository);

    domain_customers::handlers::router(service)
}
