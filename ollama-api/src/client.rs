//! Ollama API client.

use std::pin::Pin;
use std::sync::Arc;

use async_stream::try_stream;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Span;
use tracing_futures::Instrument;
use url::Url;

use crate::config::OllamaConfig;
use crate::error::{Error, Result};
use crate::ndjson::{self, StreamItem};
use crate::policy::ErrorPolicy;

/// A lazily sent, streamed response.
///
/// The request goes out on the first poll. Dropping the stream closes the
/// connection. The first error is the last item.
pub type ResponseStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// Ollama API client.
///
/// Cheap to clone; clones share the connection pool. Construction never
/// touches the network.
#[derive(Debug, Clone)]
pub struct Ollama {
    pub(crate) config: Arc<OllamaConfig>,
    pub(crate) http_client: Client,
}

impl Ollama {
    /// Create a new Ollama client with the given configuration.
    ///
    /// # Errors
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be built.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let http_client = config.http_client()?;
        Self::with_client(config, http_client)
    }

    /// Create a client over an existing `reqwest` client.
    ///
    /// Timeouts, proxies, TLS and pooling all come from `http_client`; the
    /// transport fields of `config` are ignored.
    ///
    /// # Errors
    ///
    /// Fails if the base URL does not parse.
    pub fn with_client(config: OllamaConfig, http_client: Client) -> Result<Self> {
        Url::parse(&config.base_url)?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    /// Create a client for `http://localhost:11434`.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn with_defaults() -> Result<Self> {
        Self::new(OllamaConfig::default())
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Fails if `OLLAMA_BASE_URL` does not parse or the HTTP client cannot be built.
    pub fn from_env() -> Result<Self> {
        Self::new(OllamaConfig::from_env())
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build the URL of an API path.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        tracing::debug!("POST {url}");
        self.http_client.post(url).header(ACCEPT, "application/json")
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        tracing::debug!("GET {url}");
        self.http_client.get(url).header(ACCEPT, "application/json")
    }

    pub(crate) fn head(&self, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        tracing::debug!("HEAD {url}");
        self.http_client.head(url)
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        tracing::debug!("DELETE {url}");
        self.http_client.delete(url).header(ACCEPT, "application/json")
    }

    /// Send a request and decode its JSON body, raising any non-2xx status.
    pub(crate) async fn fetch_json<R>(request: RequestBuilder, span: Span) -> Result<R>
    where
        R: DeserializeOwned,
    {
        async move {
            let body = Self::fetch_body(request).await?;
            Ok(serde_json::from_slice(&body)?)
        }
        .instrument(span)
        .await
    }

    /// Like [`Self::fetch_json`], but an empty or `null` body is `None`.
    pub(crate) async fn fetch_optional_json<R>(
        request: RequestBuilder,
        span: Span,
    ) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        async move {
            let body = Self::fetch_body(request).await?;
            if body.trim_ascii().is_empty() {
                return Ok(None);
            }
            Ok(serde_json::from_slice(&body)?)
        }
        .instrument(span)
        .await
    }

    async fn fetch_body(request: RequestBuilder) -> Result<Bytes> {
        let response = Self::check_status(request.send().await?).await?;
        let body = response.bytes().await?;

        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!("Ollama response: {}", String::from_utf8_lossy(&body));
        }

        Ok(body)
    }

    /// Send a request whose outcome is only its status, resolving failures through `policy`.
    pub(crate) async fn fetch_status(
        request: RequestBuilder,
        policy: ErrorPolicy<'_>,
        span: Span,
    ) -> Result<bool> {
        async move {
            let response = request.send().await?;
            let status = response.status();
            if status.is_success() {
                return Ok(true);
            }

            let body = response.text().await?;
            if policy.is_routine(status.as_u16()) {
                tracing::debug!("[{}] {} - {}", status.as_u16(), reason(status), body);
            } else {
                log_status_error(status, &body);
            }
            policy.resolve(status.as_u16(), reason(status), &body)
        }
        .instrument(span)
        .await
    }

    /// Prepare a streamed POST. Nothing is sent until the stream is polled.
    pub(crate) fn stream_json<B, T>(
        &self,
        path: &str,
        body: &B,
        span: Span,
    ) -> Result<ResponseStream<T>>
    where
        B: Serialize + ?Sized,
        T: StreamItem + Send + 'static,
    {
        let body = serde_json::to_vec(body)?;
        let request = self
            .post(path)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);

        let stream = try_stream! {
            let response = Self::check_status(request.send().await?).await?;
            let mut items = std::pin::pin!(ndjson::decode::<T, _, _>(response.bytes_stream()));

            while let Some(item) = items.next().await {
                yield item?;
            }
        }
        .instrument(span);

        Ok(Box::pin(stream))
    }

    /// Pass 2xx responses through; read any other response fully into [`Error::Status`].
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        log_status_error(status, &body);
        Err(Error::status(status.as_u16(), reason(status), body))
    }
}

fn reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or_default()
}

fn log_status_error(status: StatusCode, body: &str) {
    tracing::warn!("[{}] {} - {}", status.as_u16(), reason(status), body);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn with_defaults_creates_client() {
            let client = Ollama::with_defaults().unwrap();

            assert_eq!(client.base_url(), OllamaConfig::DEFAULT_BASE_URL);
        }

        #[test]
        fn new_with_custom_config() {
            let config = OllamaConfig::new().base_url("http://custom:11434").timeout(60);
            let client = Ollama::new(config).unwrap();

            assert_eq!(client.base_url(), "http://custom:11434");
        }

        #[test]
        fn with_client_injects_transport() {
            let http = Client::new();
            let client = Ollama::with_client(OllamaConfig::default(), http).unwrap();

            assert_eq!(client.base_url(), "http://localhost:11434");
        }

        #[test]
        fn rejects_unparseable_base_url() {
            let result = Ollama::new(OllamaConfig::new().base_url("not a url"));

            assert!(matches!(result, Err(Error::InvalidBaseUrl(_))));
        }

        #[test]
        fn client_is_clone_and_debug() {
            let client = Ollama::with_defaults().unwrap();
            let cloned = client.clone();

            assert_eq!(client.base_url(), cloned.base_url());
            assert!(format!("{client:?}").contains("Ollama"));
        }

        #[test]
        fn client_is_send_and_sync() {
            fn assert_send_sync<T: Send + Sync>() {}
            assert_send_sync::<Ollama>();
        }
    }

    mod url_building {
        use super::*;

        #[test]
        fn endpoint_format() {
            let client = Ollama::with_defaults().unwrap();

            assert_eq!(
                client.endpoint("api/generate"),
                "http://localhost:11434/api/generate"
            );
        }

        #[test]
        fn endpoint_normalizes_slashes() {
            let config = OllamaConfig::new().base_url("http://gpu-server:11434/");
            let client = Ollama::new(config).unwrap();

            assert_eq!(client.endpoint("/api/tags"), "http://gpu-server:11434/api/tags");
        }

        #[test]
        fn endpoint_keeps_base_path() {
            let config = OllamaConfig::new().base_url("https://proxy.local/ollama");
            let client = Ollama::new(config).unwrap();

            assert_eq!(
                client.endpoint("api/blobs/sha256:abc"),
                "https://proxy.local/ollama/api/blobs/sha256:abc"
            );
        }
    }

    #[test]
    fn reason_phrases() {
        assert_eq!(reason(StatusCode::NOT_FOUND), "Not Found");
        assert_eq!(reason(StatusCode::INTERNAL_SERVER_ERROR), "Internal Server Error");
    }
}
