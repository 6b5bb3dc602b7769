//! # Catalog Transport
//!
//! HTTP client for the catalog API.
//!
//! ## Response Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What the transport reports                         │
//! │                                                                         │
//! │  connect / timeout / broken stream  → Err(TransportError::Network)     │
//! │  status outside 2xx                 → Ok(status, body: None)           │
//! │  2xx, empty or `null` body          → Ok(status, body: None)           │
//! │  2xx, body is not the expected JSON → Err(TransportError::Decode)      │
//! │  2xx, valid JSON                    → Ok(status, body: Some(..))       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transport never retries. The request deadline comes from
//! `CatalogConfig::timeout()`.

use async_trait::async_trait;
use catalog_core::{AddProductResponse, RawProduct};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{CatalogResult, TransportError, TransportResult};
use crate::protocol::{FilePart, ProductSubmission, TransportResponse, FILES_FIELD};

/// The remote side of the catalog.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetches the full product list.
    async fn get_products(&self) -> TransportResult<TransportResponse<Vec<RawProduct>>>;

    /// Submits a new product as a multipart form.
    async fn add_product(
        &self,
        submission: ProductSubmission,
    ) -> TransportResult<TransportResponse<AddProductResponse>>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    list_url: Url,
    add_url: Url,
}

impl HttpTransport {
    /// Builds a client from the `[api]` settings.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(TransportError::from)?;

        Ok(HttpTransport {
            client,
            list_url: config.list_url()?,
            add_url: config.add_url()?,
        })
    }

    async fn read<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> TransportResult<TransportResponse<T>> {
        let status = response.status().as_u16();

        if !response.status().is_success() {
            info!(status, "Catalog API answered with failure status");
            return Ok(TransportResponse::empty(status));
        }

        let bytes = response.bytes().await?;
        debug!(status, bytes = bytes.len(), "Catalog API response received");

        Ok(TransportResponse {
            status,
            body: decode_body(&bytes)?,
        })
    }
}

/// Decodes a success body. Empty and `null` bodies decode to `None`.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> TransportResult<Option<T>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    Ok(serde_json::from_slice::<Option<T>>(bytes)?)
}

fn multipart_form(submission: ProductSubmission) -> Form {
    let mut form = Form::new();
    for (name, value) in submission.text_fields() {
        form = form.text(name, value.to_string());
    }

    match submission.files {
        FilePart::Empty => form.text(FILES_FIELD, ""),
        FilePart::File { file_name, bytes } => {
            form.part(FILES_FIELD, Part::bytes(bytes).file_name(file_name))
        }
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get_products(&self) -> TransportResult<TransportResponse<Vec<RawProduct>>> {
        debug!(url = %self.list_url, "Fetching product list");

        let response = self.client.get(self.list_url.clone()).send().await?;
        Self::read(response).await
    }

    async fn add_product(
        &self,
        submission: ProductSubmission,
    ) -> TransportResult<TransportResponse<AddProductResponse>> {
        debug!(
            url = %self.add_url,
            product_name = %submission.product_name,
            with_image = matches!(submission.files, FilePart::File { .. }),
            "Submitting product"
        );

        let response = self
            .client
            .post(self.add_url.clone())
            .multipart(multipart_form(submission))
            .send()
            .await?;
        Self::read(response).await
    }
}
