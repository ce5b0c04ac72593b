//! 应用层：路由与处理器

pub mod job;
pub mod product;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::{core::middleware::request_logging_middleware, infrastructure::store::DocumentStore};
use job::service::JobService;
use product::service::ProductService;

pub const GREETING: &str = "Products are falling from the sky 🌤️";

/// 应用状态，启动时构造后注入每个处理器
#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
    pub job_service: JobService,
}

impl AppState {
    pub fn new(products: Arc<dyn DocumentStore>, jobs: Arc<dyn DocumentStore>) -> Self {
        Self {
            product_service: ProductService::new(products),
            job_service: JobService::new(jobs),
        }
    }
}

/// 创建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/jobs", get(job::handler::list_jobs))
        .route(
            "/products",
            get(product::handler::list_products).post(product::handler::create_product),
        )
        .route("/products/:id", get(product::handler::get_product))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn root() -> &'static str {
    GREETING
}
