use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    ObjectIdPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SupplierResult;
use crate::models::{CreateSupplier, SupplierResponse, UpdateSupplier};
use crate::repository::SupplierRepository;
use crate::service::SupplierService;

const TAG: &str = "suppliers";

/// OpenAPI documentation for Suppliers API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_suppliers,
        create_supplier,
        get_supplier,
        update_supplier,
        delete_supplier,
    ),
    components(
        schemas(SupplierResponse, CreateSupplier, UpdateSupplier),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Supplier management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the supplier router with all HTTP endpoints
pub fn router<R: SupplierRepository + 'static>(service: SupplierService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route(
            "/{id}",
            get(get_supplier)
                .put(update_supplier)
                .delete(delete_supplier),
        )
        .with_state(shared_service)
}

/// List all non-deleted suppliers
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of suppliers", body = Vec<SupplierResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_suppliers<R: SupplierRepository>(
    State(service): State<Arc<SupplierService<R>>>,
) -> SupplierResult<Json<Vec<SupplierResponse>>> {
    let suppliers = service.list_suppliers().await?;
    Ok(Json(suppliers.into_iter().map(Into::into).collect()))
}

/// Create a new supplier
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateSupplier,
    responses(
        (status = 201, description = "Supplier created successfully", body = SupplierResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_supplier<R: SupplierRepository>(
    State(service): State<Arc<SupplierService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateSupplier>,
) -> SupplierResult<impl IntoResponse> {
    let supplier = service.create_supplier(input).await?;
    Ok((StatusCode::CREATED, Json(SupplierResponse::from(supplier))))
}

/// Get a supplier by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Supplier ID")
    ),
    responses(
        (status = 200, description = "Supplier found", body = SupplierResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_supplier<R: SupplierRepository>(
    State(service): State<Arc<SupplierService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> SupplierResult<Json<SupplierResponse>> {
    let supplier = service.get_supplier(id).await?;
    Ok(Json(supplier.into()))
}

/// Update a supplier
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Supplier ID")
    ),
    request_body = UpdateSupplier,
    responses(
        (status = 200, description = "Supplier updated successfully", body = SupplierResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_supplier<R: SupplierRepository>(
    State(service): State<Arc<SupplierService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<UpdateSupplier>,
) -> SupplierResult<Json<SupplierResponse>> {
    let supplier = service.update_supplier(id, input).await?;
    Ok(Json(supplier.into()))
}

/// Soft-delete a supplier
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Supplier ID")
    ),
    responses(
        (status = 204, description = "Supplier deleted successfully"),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_supplier<R: SupplierRepository>(
    State(service): State<Arc<SupplierService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> SupplierResult<impl IntoResponse> {
    service.delete_supplier(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
