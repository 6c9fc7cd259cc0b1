//! HTTP client for a backend exposing the `/api/products` contract.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::catalog::{ListParams, NewProduct, Product, ProductChanges, ResultPage};

use super::{RecordStore, StoreError};

const PRODUCTS_PATH: &str = "api/products";

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Record store backed by a remote server.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: Url,
}

impl HttpStore {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            StoreError::Transport(format!("invalid base url '{}': {}", base_url, e))
        })?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn collection_url(&self) -> Result<Url, StoreError> {
        self.base_url
            .join(PRODUCTS_PATH)
            .map_err(|e| StoreError::Transport(format!("invalid products url: {}", e)))
    }

    fn product_url(&self, id: &str) -> Result<Url, StoreError> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Transport(format!("'{}' cannot be a base url", self.base_url)))?
            .push(id);
        Ok(url)
    }

    fn list_url(&self, params: &ListParams) -> Result<Url, StoreError> {
        let mut url = self.collection_url()?;
        {
            let mut query = url.query_pairs_mut();
            if !params.filter.is_empty() {
                query.append_pair("q", &params.filter);
            }
            query.append_pair("page", &params.page.to_string());
            query.append_pair("pageSize", &params.page_size.to_string());
            if let Some(sort) = params.sort {
                query.append_pair("sortBy", sort.field.as_str());
                query.append_pair("sortDir", sort.direction.as_str());
            }
        }
        Ok(url)
    }
}

/// Turns non-2xx responses into store errors. `id` is the targeted record
/// for single-record calls, so a 404 can be reported as `NotFound`.
async fn check(response: Response, id: Option<&str>) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);

    tracing::debug!(status = %status, message = %message, "Backend returned an error");

    Err(match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => StoreError::not_found(id),
        (status, _) if status.is_client_error() => StoreError::Rejected(message),
        (status, _) => StoreError::Transport(format!("{}: {}", status, message)),
    })
}

#[async_trait]
impl RecordStore for HttpStore {
    async fn list(&self, params: &ListParams) -> Result<ResultPage, StoreError> {
        let url = self.list_url(params)?;
        let response = self.client.get(url).send().await?;
        Ok(check(response, None).await?.json().await?)
    }

    async fn create(&self, product: NewProduct) -> Result<Product, StoreError> {
        let url = self.collection_url()?;
        let response = self.client.post(url).json(&product).send().await?;
        Ok(check(response, None).await?.json().await?)
    }

    async fn update(&self, id: &str, changes: ProductChanges) -> Result<Product, StoreError> {
        let url = self.product_url(id)?;
        let response = self.client.put(url).json(&changes).send().await?;
        Ok(check(response, Some(id)).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = self.product_url(id)?;
        let response = self.client.delete(url).send().await?;
        check(response, Some(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SortField, SortSpec};

    fn store() -> HttpStore {
        HttpStore::new("http://127.0.0.1:8080", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn list_url_omits_empty_filter_and_sort() {
        let url = store().list_url(&ListParams::default()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/api/products?page=1&pageSize=10"
        );
    }

    #[test]
    fn list_url_encodes_every_key() {
        let params = ListParams {
            filter: "desk lamp".into(),
            page: 3,
            page_size: 20,
            sort: Some(SortSpec::descending(SortField::Stock)),
        };
        let url = store().list_url(&params).unwrap();
        assert_eq!(
            url.query(),
            Some("q=desk+lamp&page=3&pageSize=20&sortBy=stock&sortDir=desc")
        );
    }

    #[test]
    fn product_url_escapes_id() {
        let url = store().product_url("a/b").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/products/a%2Fb");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(
            HttpStore::new("not a url", Duration::from_secs(1)),
            Err(StoreError::Transport(_))
        ));
    }
}
