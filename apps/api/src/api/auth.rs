use axum::Router;
use domain_customers::{
    auth_handlers::{auth_router, AuthState},
    CustomerService, MongoCustomerRepository,
};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = MongoCustomerRepository::new(state.db.clone());
    let service = CustomerService::new(repository);

    let auth_state = AuthState {
        service,
        jwt_auth: state.jwt_auth.clone(),
    };

    auth_router(auth_state)
}
