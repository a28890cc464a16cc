//! Supabase (PostgREST) implementation of ProductRepository

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::{Map, Value};

use catalog_embed::{DomainError, ProductId, ProductRecord, ProductRepository};

use crate::config::SupabaseConfig;

const PRODUCT_COLUMNS: &str = "id,name,description,category,price,tags,specification";

/// PostgREST implementation of ProductRepository
pub struct SupabaseProductRepository {
    client: Client,
    rest_url: String,
    config: SupabaseConfig,
}

impl SupabaseProductRepository {
    pub fn new(config: SupabaseConfig, timeout: Duration) -> Result<Self, DomainError> {
        let invalid_key = |_: InvalidHeaderValue| {
            DomainError::Connection("Service role key is not a valid header value".to_string())
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.service_role_key).map_err(invalid_key)?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.service_role_key))
                .map_err(invalid_key)?,
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| DomainError::Connection(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            config,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.rest_url, self.config.table)
    }

    fn select_clause(&self) -> String {
        format!("{},{}", PRODUCT_COLUMNS, self.config.seller.select_fragment())
    }

    async fn fetch_page(&self, offset: usize) -> Result<Vec<ProductRecord>, DomainError> {
        let resp = self
            .client
            .get(self.table_url())
            .query(&[
                ("select", self.select_clause()),
                ("order", "id.asc".to_string()),
                ("limit", self.config.page_size.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Connection(format!("Failed to reach Supabase: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Connection(format!(
                "Fetching {} failed ({}): {}",
                self.config.table, status, body
            )));
        }

        resp.json::<Vec<ProductRecord>>().await.map_err(|e| {
            DomainError::Connection(format!("Malformed product list response: {e}"))
        })
    }
}

#[async_trait]
impl ProductRepository for SupabaseProductRepository {
    async fn fetch_all(&self) -> Result<Vec<ProductRecord>, DomainError> {
        let mut products = Vec::new();

        // The server's max-rows may cap a page below `page_size`, so only an
        // empty page marks the end; the offset advances by what actually arrived.
        loop {
            let page = self.fetch_page(products.len()).await?;
            if page.is_empty() {
                break;
            }
            products.extend(page);

            tracing::debug!(fetched = products.len(), "📦 Fetched product page");
        }

        Ok(products)
    }

    async fn update_embedding(&self, id: &ProductId, embedding: &[f32]) -> Result<(), DomainError> {
        let mut body = Map::new();
        body.insert(
            self.config.embedding_column.clone(),
            Value::from(embedding.to_vec()),
        );

        let resp = self
            .client
            .patch(self.table_url())
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Repository(format!("Update request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Repository(format!(
                "Update rejected ({}): {}",
                status, body
            )));
        }

        Ok(())
    }

    fn table(&self) -> &str {
        &self.config.table
    }
}
