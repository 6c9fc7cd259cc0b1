use axum::routing::{get, put};
use axum::Router;

use super::handlers::{create_product, delete_product, list_products, update_product, AppState};
use super::health::health;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            put(update_product).delete(delete_product),
        )
        .with_state(state)
}
