//! API client for backend communication
//!
//! Thin request layer: builds the URL, attaches auth, sends, and decodes the
//! JSON payload. Non-2xx responses become [`ApiError::Status`] carrying the
//! server's message. Nothing here notifies the user; that is the caller's job.

pub mod artist_class;
pub mod billing;
pub mod contest;
pub mod inquiry;
pub mod work;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use museume_types::ImageUpload;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, |req| req).await
    }

    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        self.send(Method::GET, path, |req| req.query(query)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::POST, path, |req| req.json(body)).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::POST, path, |req| req).await
    }

    pub async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        self.send(Method::POST, path, |req| req.multipart(form)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::DELETE, path, |req| req).await
    }

    async fn send<T, F>(&self, method: Method, path: &str, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.config.endpoint(path);
        tracing::debug!(%method, path, "api request");

        let mut req = self.http.request(method.clone(), &url);
        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }

        let response = build(req).send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "api request failed to send");
            ApiError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &text);
            tracing::warn!(%method, path, status = status.as_u16(), error = %err, "api request rejected");
            return Err(err);
        }

        decode_body(&text).map_err(|e| {
            tracing::warn!(%method, path, error = %e, "api response did not decode");
            e
        })
    }
}

/// Decode a success body. Empty bodies (`204 No Content`) decode as `{}`.
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    let text = if text.trim().is_empty() { "{}" } else { text };
    Ok(serde_json::from_str(text)?)
}

/// Multipart file part for an image upload.
pub(crate) fn image_part(upload: &ImageUpload) -> Result<Part> {
    Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.mime)
        .map_err(|e| ApiError::Config(format!("invalid MIME type {}: {}", upload.mime, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use museume_types::MessageResponse;

    #[test]
    fn empty_body_decodes_as_empty_object() {
        let resp: MessageResponse = decode_body("").unwrap();
        assert_eq!(resp, MessageResponse::default());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = decode_body::<MessageResponse>("{not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn bad_mime_is_rejected() {
        let upload = ImageUpload::new("a.png", "not a mime", vec![1]);
        assert!(image_part(&upload).is_err());
    }
}
