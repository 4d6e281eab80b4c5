use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::StoreError;

/// Shared transport: one configured `reqwest::Client` plus the API base
/// URL. Stateless beyond configuration; cloned into every store.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

/// Error body shape used by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(Client::new(), base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// `GET` with a bearer token and optional query parameters.
    ///
    /// `Ok(None)` means `204 No Content`: the call succeeded but there is
    /// no body to decode.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, StoreError> {
        tracing::debug!(path, "GET");
        let req = self.http.get(self.url(path)).query(query).bearer_auth(token);
        decode(req.send().await?).await
    }

    /// `POST` with a JSON body. Auth endpoints pass `token: None`; every
    /// other call carries the bearer token.
    pub(crate) async fn post_json<B, T>(
        &self,
        token: Option<&str>,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, StoreError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let mut req = self.http.post(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        decode(req.send().await?).await
    }

    pub(crate) async fn put_json<B, T>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, StoreError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "PUT");
        let req = self.http.put(self.url(path)).json(body).bearer_auth(token);
        decode(req.send().await?).await
    }

    /// `DELETE`. Any success status counts, body or no body.
    pub(crate) async fn delete(&self, token: &str, path: &str) -> Result<(), StoreError> {
        tracing::debug!(path, "DELETE");
        let req: RequestBuilder = self.http.delete(self.url(path)).bearer_auth(token);
        let resp = req.send().await?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(error_for(resp).await)
    }
}

/// Maps a response to the operation outcome: 2xx with a body decodes to
/// `Some`, `204` is `None`, anything else becomes `StoreError::Server`
/// carrying the server's own description.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<Option<T>, StoreError> {
    let status = resp.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    if status.is_success() {
        return Ok(Some(resp.json::<T>().await?));
    }
    Err(error_for(resp).await)
}

async fn error_for(resp: Response) -> StoreError {
    let status = resp.status();
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("server error")
            .to_string(),
    };
    StoreError::Server { status, message }
}
