//! REST implementation of BillStore
//!
//! Talks to the Billed backend:
//!
//! - `POST {base}/bills` as multipart (`file`, `email`) answers `{ "fileUrl", "key" }`
//! - `PATCH {base}/bills/{key}` with the JSON record
//!
//! Non-2xx answers become [`StoreError::Remote`] carrying the body's `message`
//! field, or `"Erreur {status}"` when the body has none.

use crate::core::attachment::{CreatedBill, FileUpload};
use crate::core::bill::BillRecord;
use crate::core::error::StoreError;
use crate::core::store::BillStore;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Bill store backed by the Billed REST API
#[derive(Clone)]
pub struct HttpBillStore {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBillStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Send `Authorization: Bearer {token}` with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{path}", self.base_url);
        let mut req = self.client.request(method, &url);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Erreur {}", status.as_u16()));
        tracing::debug!(status = status.as_u16(), message = %message, "Store answered with an error");
        Err(StoreError::Remote(message))
    }
}

fn unavailable(err: reqwest::Error) -> StoreError {
    StoreError::Unavailable {
        message: err.to_string(),
    }
}

#[async_trait]
impl BillStore for HttpBillStore {
    async fn create(&self, upload: FileUpload) -> Result<CreatedBill, StoreError> {
        let FileUpload { file, email } = upload;

        let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
        if !file.declared_type.is_empty() {
            part = part.mime_str(&file.declared_type).map_err(unavailable)?;
        }
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("email", email);

        let response = self
            .request(reqwest::Method::POST, "bills")
            .multipart(form)
            .send()
            .await
            .map_err(unavailable)?;

        Self::check(response)
            .await?
            .json::<CreatedBill>()
            .await
            .map_err(unavailable)
    }

    async fn update(&self, key: Option<&str>, bill: &BillRecord) -> Result<(), StoreError> {
        // The backend has no route for a bill without a key
        let Some(key) = key else {
            return Err(StoreError::NotFound { key: String::new() });
        };

        let response = self
            .request(reqwest::Method::PATCH, &format!("bills/{key}"))
            .json(bill)
            .send()
            .await
            .map_err(unavailable)?;

        Self::check(response).await?;
        Ok(())
    }
}

impl std::fmt::Debug for HttpBillStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBillStore")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}
