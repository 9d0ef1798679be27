use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, JsonArrayStream, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, DataIntegrityResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use futures::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::ProductResult;
use crate::models::{CreateProduct, ProductStatus, ReadProduct, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

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
        schemas(ReadProduct, CreateProduct, UpdateProduct, ProductStatus),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            DataIntegrityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Stream every product as a JSON array
///
/// The first element is awaited before the status line is sent, so a storage
/// failure at that point still produces an error envelope. Later failures
/// truncate the body.
#[utoipa::path(
    get,
    path = "",
    tag = entity::TAG,
    responses(
        (status = 200, description = "All products in id order", body = Vec<ReadProduct>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<impl IntoResponse> {
    let mut products = service.get_all();
    let first = products.try_next().await?;

    let body = stream::iter(first.map(Ok)).chain(products);
    Ok(JsonArrayStream(body))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = entity::TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ReadProduct),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ReadProduct),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ReadProduct>> {
    let product = service.get_by_id(id).await?;
    Ok(Json(product))
}

/// Replace every mutable field of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 204, description = "Product updated"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<StatusCode> {
    service.update(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product; deleting an absent ID also succeeds
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted or already absent"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
