use crate::{
    auth::Authentication,
    error::{HsdsError, HsdsResult},
    models::ErrorResponse,
    apis::{AttributeApi, DatasetApi, DomainApi, GroupApi},
};
use log::debug;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

/// Client for the HSDS REST API
#[derive(Clone)]
pub struct HsdsClient {
    client: Client,
    base_url: Url,
    auth: Arc<dyn Authentication>,
}

impl HsdsClient {
    /// Create a new HSDS client with authentication
    pub fn new(
        base_url: impl AsRef<str>,
        auth: impl Authentication + 'static,
    ) -> HsdsResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Self::with_client(client, base_url, auth)
    }

    /// Create a new HSDS client with custom reqwest client
    pub fn with_client(
        client: Client,
        base_url: impl AsRef<str>,
        auth: impl Authentication + 'static,
    ) -> HsdsResult<Self> {
        let base_url = Url::parse(base_url.as_ref())?;

        Ok(Self {
            client,
            base_url,
            auth: Arc::new(auth),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get Domain API
    pub fn domains(&self) -> DomainApi<'_> {
        DomainApi::new(self)
    }

    /// Get Group API
    pub fn groups(&self) -> GroupApi<'_> {
        GroupApi::new(self)
    }

    /// Get Dataset API
    pub fn datasets(&self) -> DatasetApi<'_> {
        DatasetApi::new(self)
    }

    /// Get Attribute API
    pub fn attributes(&self) -> AttributeApi<'_> {
        AttributeApi::new(self)
    }

    /// Build a request to the given path with authentication
    pub async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> HsdsResult<RequestBuilder> {
        let url = self.base_url.join(path)?;
        debug!("HTTP {} {}", method, url);
        let mut request = self.client.request(method, url);

        let mut headers = reqwest::header::HeaderMap::new();
        self.auth.apply_auth(&mut headers).await?;

        for (name, value) in headers.iter() {
            request = request.header(name, value);
        }

        Ok(request)
    }

    /// Execute a request and handle common error cases
    pub async fn execute<T>(&self, request: RequestBuilder) -> HsdsResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle response and deserialize JSON
    async fn handle_response<T>(&self, response: Response) -> HsdsResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();

        if status.is_success() {
            // Some write endpoints answer with an empty body
            let body = response.bytes().await?;
            let json = if body.iter().all(u8::is_ascii_whitespace) {
                serde_json::from_slice(b"{}")
            } else {
                serde_json::from_slice(&body)
            };
            json.map_err(|e| HsdsError::InvalidResponse(format!("HTTP {}: {}", status, e)))
        } else {
            self.handle_error_response(status, response).await
        }
    }

    /// Handle error responses
    async fn handle_error_response<T>(&self, status: StatusCode, response: Response) -> HsdsResult<T> {
        let error_message = match response.json::<ErrorResponse>().await {
            Ok(error_resp) => {
                error_resp.message
                    .or(error_resp.error)
                    .unwrap_or_else(|| format!("HTTP {}", status))
            }
            Err(_) => format!("HTTP {}", status),
        };
        debug!("HTTP {} error: {}", status.as_u16(), error_message);

        match status {
            StatusCode::UNAUTHORIZED => Err(HsdsError::auth_error(error_message)),
            StatusCode::FORBIDDEN => Err(HsdsError::PermissionDenied(error_message)),
            StatusCode::NOT_FOUND => Err(HsdsError::ObjectNotFound(error_message)),
            StatusCode::CONFLICT => Err(HsdsError::Conflict(error_message)),
            StatusCode::BAD_REQUEST => Err(HsdsError::invalid_param(error_message)),
            _ => Err(HsdsError::api_error(status.as_u16(), error_message)),
        }
    }

    /// Add domain query parameter to request
    pub fn with_domain(request: RequestBuilder, domain: &str) -> RequestBuilder {
        request.query(&[("domain", domain)])
    }
}
