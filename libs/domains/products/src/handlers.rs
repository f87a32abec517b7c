//! HTTP handlers for Products API

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use axum_helpers::{
    ApiResponse, Created, ErrorEnvelope, Message, PaginatedResponse, ValidatedJson,
    ValidatedQuery,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{Brand, CreateProduct, PageQuery, Pagination, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const PRODUCT_DELETED: &str = "Product deleted successfully";

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
        schemas(Product, Brand, CreateProduct, UpdateProduct, Pagination, Message, ErrorEnvelope),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
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

/// List products with their brands
///
/// Without `limit` every product from `offset` on is returned.
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of products", body = PaginatedResponse<Product, Pagination>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(query): ValidatedQuery<PageQuery>,
) -> ProductResult<PaginatedResponse<Product, Pagination>> {
    let page = service.list_products(query.limit, query.offset).await?;
    Ok(PaginatedResponse::new(page.data, page.pagination))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<Created<Product>> {
    let product = service.create_product(input).await?;
    Ok(Created(product))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID, with or without the `product:` prefix")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<Product>),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<ApiResponse<Product>> {
    service
        .get_product_by_id(&id)
        .await
        .map(ApiResponse::ok)
        .ok_or_else(ProductError::not_found)
}

/// Update a product; only the fields sent are changed
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<UpdateProduct>,
) -> ProductResult<ApiResponse<Product>> {
    service
        .update_product(&id, patch)
        .await?
        .map(ApiResponse::ok)
        .ok_or_else(ProductError::not_found)
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<Message>),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<ApiResponse<Message>> {
    if service.delete_product(&id).await {
        Ok(ApiResponse::ok(Message::new(PRODUCT_DELETED)))
    } else {
        Err(ProductError::not_found())
    }
}
