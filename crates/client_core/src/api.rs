use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::protocol::ApiResponse;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Failure of a binary download. Non-OK statuses and transport failures are
/// reported separately so callers can word them differently.
#[derive(Debug, Error)]
pub enum BinaryError {
    #[error("server responded with status {0}")]
    Status(StatusCode),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl QrImage {
    /// Self-contained URL for the image, suitable for handing to a viewer.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }

    pub fn file_extension(&self) -> &'static str {
        match self.content_type.as_str() {
            "image/svg+xml" => "svg",
            "image/jpeg" => "jpg",
            _ => "png",
        }
    }
}

/// Thin JSON gateway over the REST API. Every JSON call resolves to an
/// [`ApiResponse`]; transport failures collapse into
/// [`ApiResponse::transport_failure`].
#[derive(Debug, Clone)]
pub struct ApiGateway {
    http: Client,
    base_url: String,
}

impl ApiGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> ApiResponse<T> {
        debug!(method = "GET", path, "api request");
        let req = Self::authorize(self.http.get(self.url(path)), token);
        self.execute(path, req).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method = "POST", path, "api request");
        let req = Self::authorize(self.http.post(self.url(path)).json(body), token);
        self.execute(path, req).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method = "PUT", path, "api request");
        let req = Self::authorize(self.http.put(self.url(path)).json(body), token);
        self.execute(path, req).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> ApiResponse<T> {
        debug!(method = "DELETE", path, "api request");
        let req = Self::authorize(self.http.delete(self.url(path)), token);
        self.execute(path, req).await
    }

    pub async fn get_binary(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<QrImage, BinaryError> {
        debug!(method = "GET", path, "api binary request");
        let res = Self::authorize(self.http.get(self.url(path)), token)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            return Err(BinaryError::Status(status));
        }
        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("image/png")
            .to_string();
        let bytes = res.bytes().await?.to_vec();
        Ok(QrImage {
            content_type,
            bytes,
        })
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        req: RequestBuilder,
    ) -> ApiResponse<T> {
        match Self::send_json(req).await {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(path, error = %err, "api call failed before reaching the application");
                ApiResponse::transport_failure()
            }
        }
    }

    // HTTP error statuses are not inspected: the server reports them through the envelope.
    async fn send_json<T: DeserializeOwned>(
        req: RequestBuilder,
    ) -> reqwest::Result<ApiResponse<T>> {
        req.send().await?.json::<ApiResponse<T>>().await
    }
}
