//! Request handlers for the products API.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rand::Rng;
use serde::Deserialize;

use crate::catalog::{
    ListParams, Product, ProductInput, ProductPatch, ResultPage, SortDirection, SortField,
    SortSpec, DEFAULT_PAGE_SIZE,
};
use crate::config::ServerConfig;
use crate::store::RecordStore;

use super::error::ApiError;

/// Artificial response delay, drawn uniformly from `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    min: Duration,
    max: Duration,
}

impl Latency {
    pub fn none() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            min: Duration::from_millis(config.latency_min_ms),
            max: Duration::from_millis(config.latency_max_ms.max(config.latency_min_ms)),
        }
    }

    async fn wait(&self) {
        if self.max.is_zero() {
            return;
        }
        let delay = rand::thread_rng().gen_range(self.min..=self.max);
        tokio::time::sleep(delay).await;
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub latency: Latency,
}

/// Raw list query. Every field is optional and parsed leniently.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl ListQuery {
    /// Unparseable numbers fall back to defaults and are floored at one; an
    /// unknown `sortBy` means unsorted.
    pub fn to_params(&self) -> ListParams {
        let number = |raw: &Option<String>, default: usize| {
            raw.as_deref()
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(default)
                .max(1)
        };
        let sort = self
            .sort_by
            .as_deref()
            .and_then(SortField::parse)
            .map(|field| {
                let direction = self
                    .sort_dir
                    .as_deref()
                    .map(SortDirection::parse)
                    .unwrap_or_default();
                SortSpec::new(field, direction)
            });

        ListParams {
            filter: self.q.clone().unwrap_or_default(),
            page: number(&self.page, 1),
            page_size: number(&self.page_size, DEFAULT_PAGE_SIZE),
            sort,
        }
    }
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ResultPage>, ApiError> {
    state.latency.wait().await;
    let params = query.to_params();
    let page = state.store.list(&params).await?;
    tracing::debug!(
        filter = %params.filter,
        requested = params.page,
        served = page.page,
        total = page.total,
        "Listed products"
    );
    Ok(Json(page))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(input) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    state.latency.wait().await;
    let product = state.store.create(input.validate()?).await?;
    tracing::info!(id = %product.id, name = %product.name, "Created product");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(patch) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    state.latency.wait().await;
    let product = state.store.update(&id, patch.validate()?).await?;
    tracing::info!(id = %product.id, status = %product.status, "Updated product");
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.latency.wait().await;
    state.store.delete(&id).await?;
    tracing::info!(id = %id, "Deleted product");
    Ok(StatusCode::NO_CONTENT)
}
