//! Welcome document at `/`

use axum::{Json, Router, routing::get};
use serde::Serialize;

#[derive(Serialize)]
struct ApiEndpoints {
    products: &'static str,
    #[serde(rename = "productById")]
    product_by_id: &'static str,
    documentation: &'static str,
}

#[derive(Serialize)]
struct Endpoints {
    api: ApiEndpoints,
    root: &'static str,
}

#[derive(Serialize)]
struct Welcome {
    message: &'static str,
    endpoints: Endpoints,
}

async fn home() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to the Catalog API",
        endpoints: Endpoints {
            api: ApiEndpoints {
                products: "/api/products",
                product_by_id: "/api/products/{id}",
                documentation: "/api/docs",
            },
            root: "/",
        },
    })
}

pub fn router() -> Router {
    Router::new().route("/", get(home))
}
