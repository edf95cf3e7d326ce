use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    ValidatedJson,
};
use domain_categories::CategoryRepository;
use domain_suppliers::SupplierRepository;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, ProductDraft, ProductImageUpload, ProductPage, ProductResponse, UpdateProduct,
};
use crate::query::ProductQuery;
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        list_page,
        search_products,
        create_product,
        seed_products,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            ProductResponse,
            ProductPage,
            CreateProduct,
            UpdateProduct,
            ProductDraft,
            SeedRequest,
            SeedResult
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Bulk seeding request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SeedRequest {
    pub products: Vec<ProductDraft>,
}

/// Bulk seeding result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedResult {
    pub inserted: usize,
}

/// Create the product router with all HTTP endpoints
pub fn router<R, C, S>(service: ProductService<R, C, S>) -> Router
where
    R: ProductRepository + 'static,
    C: CategoryRepository + 'static,
    S: SupplierRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/list", get(list_page))
        .route("/search", get(search_products))
        .route("/fake", post(seed_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List every non-deleted product with resolved references
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All products", body = Vec<ProductResponse>),
        (status = 400, description = "Listing failed")
    )
)]
async fn list_products<R, C, S>(
    State(service): State<Arc<ProductService<R, C, S>>>,
) -> ProductResult<Json<Vec<ProductResponse>>>
where
    R: ProductRepository,
    C: CategoryRepository,
    S: SupplierRepository,
{
    let products = service.list_all().await?;
    Ok(Json(products))
}

/// Paginated listing with the fixed sort order
#[utoipa::path(
    get,
    path = "/list",
    tag = TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "Page of products", body = ProductPage),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn list_page<R, C, S>(
    State(service): State<Arc<ProductService<R, C, S>>>,
    Query(query): Query<ProductQuery>,
) -> ProductResult<Json<ProductPage>>
where
    R: ProductRepository,
    C: CategoryRepository,
    S: SupplierRepository,
{
    let page = service.list_page(query.page, query.page_size).await?;
    Ok(Json(page))
}

/// Keyword/reference/price-range search
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "Matching products", body = ProductPage),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn search_products<R, C, S>(
    State(service): State<Arc<ProductService<R, C, S>>>,
    Query(query): Query<ProductQuery>,
) -> ProductResult<Json<ProductPage>>
where
    R: ProductRepository,
    C: CategoryRepository,
    S: SupplierRepository,
{
    let page = service.search_products(query).await?;
    Ok(Json(page))
}

/// Create a product from a multipart form: scalar fields plus image files.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body(content_type = "multipart/form-data", content = CreateProduct),
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R, C, S>(
    State(service): State<Arc<ProductService<R, C, S>>>,
    mut multipart: Multipart,
) -> ProductResult<impl IntoResponse>
where
    R: ProductRepository,
    C: CategoryRepository,
    S: SupplierRepository,
{
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut files: Vec<ProductImageUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ProductError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(filename) = field.file_name().map(ToString::to_string) {
            let data = field
                .bytes()
                .await
                .map_err(|e| ProductError::Validation(format!("Failed to read upload: {}", e)))?;
            files.push(ProductImageUpload {
                field: name,
                filename,
                data: data.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ProductError::Validation(format!("Failed to read field: {}", e)))?;
            fields.insert(name, value);
        }
    }

    let parse_f64 = |fields: &HashMap<String, String>, key: &str| {
        fields.get(key).and_then(|v| v.parse::<f64>().ok())
    };
    let input = CreateProduct {
        name: fields.get("name").cloned().unwrap_or_default(),
        price: parse_f64(&fields, "price").unwrap_or(0.0),
        discount: parse_f64(&fields, "discount").unwrap_or(0.0),
        stock: fields
            .get("stock")
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0),
        description: fields.get("description").cloned().unwrap_or_default(),
        category_id: fields.get("categoryId").cloned().unwrap_or_default(),
        supplier_id: fields.get("supplierId").cloned().unwrap_or_default(),
    };

    let product = service.create_product(input, files).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// Bulk-seed products, attaching any live category and supplier
#[utoipa::path(
    post,
    path = "/fake",
    tag = TAG,
    request_body = SeedRequest,
    responses(
        (status = 200, description = "Products inserted", body = SeedResult),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn seed_products<R, C, S>(
    State(service): State<Arc<ProductService<R, C, S>>>,
    Json(request): Json<SeedRequest>,
) -> ProductResult<Json<SeedResult>>
where
    R: ProductRepository,
    C: CategoryRepository,
    S: SupplierRepository,
{
    let inserted = service.seed_products(request.products).await?;
    Ok(Json(SeedResult { inserted }))
}

/// Get a product by ID with resolved references.
///
/// A malformed or unknown id is indistinguishable to the caller: both are 404.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_product<R, C, S>(
    State(service): State<Arc<ProductService<R, C, S>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<ProductResponse>>
where
    R: ProductRepository,
    C: CategoryRepository,
    S: SupplierRepository,
{
    let product = service.get_product(&id).await?;
    Ok(Json(product))
}

/// Replace a product's scalar fields and references (images untouched)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_product<R, C, S>(
    State(service): State<Arc<ProductService<R, C, S>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductResponse>>
where
    R: ProductRepository,
    C: CategoryRepository,
    S: SupplierRepository,
{
    let product = service.update_product(&id, input).await?;
    Ok(Json(product.into()))
}

/// Hard-delete a product and its image files
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_product<R, C, S>(
    State(service): State<Arc<ProductService<R, C, S>>>,
    Path(id): Path<String>,
) -> ProductResult<impl IntoResponse>
where
    R: ProductRepository,
    C: CategoryRepository,
    S: SupplierRepository,
{
    service.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
