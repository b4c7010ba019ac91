//! HTTP handlers for Products API

use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestWriteResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    AppError, UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProductDto, ListProductsQuery, ProductDto, ProductPage, UpdateProductDto};
use crate::service::ProductService;
use crate::unit_of_work::UnitOfWorkFactory;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(ProductDto, CreateProductDto, UpdateProductDto, ProductPage),
        responses(
            NotFoundResponse,
            BadRequestWriteResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<F: UnitOfWorkFactory>(service: ProductService<F>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products with optional filters and paging
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 400, description = "Malformed query string"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<F: UnitOfWorkFactory>(
    State(service): State<Arc<ProductService<F>>>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<Json<ProductPage>, AppError> {
    let Query(query) = query?;
    let page = service.list(query).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created successfully", body = ProductDto,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestWriteResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<F: UnitOfWorkFactory>(
    State(service): State<Arc<ProductService<F>>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(input): ValidatedJson<CreateProductDto>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create(input).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<F: UnitOfWorkFactory>(
    State(service): State<Arc<ProductService<F>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductDto>> {
    let product = service.get_by_id(id).await?;
    Ok(Json(product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductDto),
        (status = 400, response = BadRequestWriteResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<F: UnitOfWorkFactory>(
    State(service): State<Arc<ProductService<F>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProductDto>,
) -> ProductResult<Json<ProductDto>> {
    let product = service.update(id, input).await?;
    Ok(Json(product))
}

/// Soft-delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<F: UnitOfWorkFactory>(
    State(service): State<Arc<ProductService<F>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
