use utoipa::OpenApi;

/// Aggregated OpenAPI documentation for the whole API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Product catalog, suppliers, categories, and customer sessions"
    ),
    nest(
        (path = "/api/products", api = domain_products::handlers::ApiDoc),
        (path = "/api/categories", api = domain_categories::handlers::ApiDoc),
        (path = "/api/suppliers", api = domain_suppliers::handlers::ApiDoc),
        (path = "/api/customers", api = domain_customers::handlers::ApiDoc),
        (path = "/api/auth", api = domain_customers::auth_handlers::ApiDoc),
    )
)]
pub struct ApiDoc;
