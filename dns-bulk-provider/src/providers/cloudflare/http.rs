//! Cloudflare request helpers
//!
//! Every verb goes through [`CloudflareProvider::send`]: one attempt via
//! [`HttpUtils`], then the `{success, result, errors}` envelope is unwrapped.

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CF_API_BASE, CloudflareProvider, CloudflareResponse};

/// One page of a listing plus the paging info the API applied.
pub(crate) struct CloudflarePage<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_count: u32,
}

impl CloudflareProvider {
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{CF_API_BASE}{path}"))
            .bearer_auth(&self.api_token)
    }

    /// Send a request once and unwrap the response envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: &str,
        path: &str,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let (status, body) =
            HttpUtils::execute_request(request, self.provider_name(), method, path).await?;

        let envelope: CloudflareResponse<T> = match HttpUtils::parse_json(&body, self.provider_name())
        {
            Ok(envelope) => envelope,
            Err(e) if status >= 400 => return Err(self.status_error(status, e)),
            Err(e) => return Err(e),
        };

        if !envelope.success {
            let raw = envelope.errors.first().map_or_else(
                || RawApiError::new("Unknown error"),
                |e| RawApiError::with_code(e.code.to_string(), e.message.clone()),
            );
            log::warn!(
                "[{}] {method} {path} failed (HTTP {status}): {}",
                self.provider_name(),
                raw.message
            );
            return Err(self.map_error(raw, context));
        }

        Ok(envelope)
    }

    /// Fallback for error responses whose body is not a Cloudflare envelope.
    fn status_error(&self, status: u16, parse_error: ProviderError) -> ProviderError {
        match status {
            401 => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: None,
            },
            403 => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: None,
            },
            _ => self.unknown_error(RawApiError::with_code(
                status.to_string(),
                parse_error.message(),
            )),
        }
    }

    fn require_result<T>(&self, envelope: CloudflareResponse<T>) -> Result<T> {
        envelope
            .result
            .ok_or_else(|| self.parse_error("Response is missing the result field"))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let envelope = self
            .send(self.request(Method::GET, path), "GET", path, context)
            .await?;
        self.require_result(envelope)
    }

    /// GET one page of a listing. `per_page` must already be clamped by the caller.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        per_page: u32,
        context: ErrorContext,
    ) -> Result<CloudflarePage<T>> {
        let request = self
            .request(Method::GET, path)
            .query(&[("page", page), ("per_page", per_page)]);
        let envelope: CloudflareResponse<Vec<T>> =
            self.send(request, "GET", path, context).await?;

        let (page, per_page, total_count) = envelope
            .result_info
            .as_ref()
            .map_or((page, per_page, 0), |info| {
                (info.page, info.per_page, info.total_count)
            });

        Ok(CloudflarePage {
            items: envelope.result.unwrap_or_default(),
            page,
            per_page,
            total_count,
        })
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let request = self.request(Method::POST, path).json(body);
        let envelope = self.send(request, "POST", path, context).await?;
        self.require_result(envelope)
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let request = self.request(Method::PUT, path).json(body);
        let envelope = self.send(request, "PUT", path, context).await?;
        self.require_result(envelope)
    }

    /// DELETE, returning the envelope's `success` flag.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<bool> {
        let envelope: CloudflareResponse<T> = self
            .send(self.request(Method::DELETE, path), "DELETE", path, context)
            .await?;
        Ok(envelope.success)
    }
}
