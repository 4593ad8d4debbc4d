use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;

use crate::client_logger::BackendLogger;
use crate::error::{Error, Result};
use crate::observability;
use crate::types::{ChatReply, ChatRequest, Message, ThreadId, ThreadSummary};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Operations the conversation core needs from the chat backend.
///
/// [`Backend`] implements this against the HTTP API. The exchange controller
/// and thread registry depend only on this trait, so tests can substitute a
/// scripted implementation.
#[async_trait::async_trait]
pub trait ChatApi: Send + Sync {
    /// Send one prompt for the given thread and return the complete reply text.
    async fn send_message(&self, message: &str, thread_id: &ThreadId) -> Result<String>;

    /// Fetch summaries for all known threads.
    async fn list_threads(&self) -> Result<Vec<ThreadSummary>>;

    /// Fetch the ordered message history for one thread.
    async fn fetch_thread(&self, thread_id: &ThreadId) -> Result<Vec<Message>>;

    /// Delete a thread's backing storage.
    async fn delete_thread(&self, thread_id: &ThreadId) -> Result<()>;
}

/// HTTP client for the chat backend.
#[derive(Clone)]
pub struct Backend {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
    logger: Option<Arc<dyn BackendLogger>>,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Backend {
    /// Create a new backend client against the default base URL.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    ///
    /// `base_url` must be a valid absolute URL; a trailing slash is appended
    /// if missing so endpoint paths can be joined by concatenation.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url)
            .map_err(|e| Error::url(format!("Invalid base URL: {}", base_url), Some(e)))?;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes all backend traffic.
    pub fn with_logger(mut self, logger: Arc<dyn BackendLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Map reqwest transport failures to our Error type.
    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Process API response errors and convert to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        // The backend reports errors as `{ "error": "..." }` when it reports
        // a body at all.
        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let error_message = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| {
                if error_body.is_empty() {
                    status.to_string()
                } else {
                    error_body.clone()
                }
            });

        match status_code {
            404 => Error::not_found(error_message, None, None),
            408 => Error::timeout(error_message, None),
            500 => Error::internal_server(error_message),
            502..=504 => Error::service_unavailable(error_message),
            _ => Error::api(status_code, error_message),
        }
    }

    async fn check_status(response: Response) -> Result<Response> {
        if !response.status().is_success() {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl ChatApi for Backend {
    async fn send_message(&self, message: &str, thread_id: &ThreadId) -> Result<String> {
        observability::CLIENT_REQUESTS.click();
        let url = format!("{}chat", self.base_url);
        let body = ChatRequest::new(message, thread_id.clone());

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                self.transport_error(e)
            })?;
        let response = Self::check_status(response).await?;

        let reply = response.json::<ChatReply>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })?;
        if let Some(logger) = &self.logger {
            logger.log_reply(thread_id, &reply.reply);
        }
        Ok(reply.reply)
    }

    async fn list_threads(&self) -> Result<Vec<ThreadSummary>> {
        observability::CLIENT_REQUESTS.click();
        let url = format!("{}thread", self.base_url);

        let response = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                self.transport_error(e)
            })?;
        let response = Self::check_status(response).await?;

        let threads = response.json::<Vec<ThreadSummary>>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse thread list: {}", e),
                Some(Box::new(e)),
            )
        })?;
        if let Some(logger) = &self.logger {
            logger.log_thread_list(&threads);
        }
        Ok(threads)
    }

    async fn fetch_thread(&self, thread_id: &ThreadId) -> Result<Vec<Message>> {
        observability::CLIENT_REQUESTS.click();
        let url = format!("{}thread/{}", self.base_url, thread_id);

        let response = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                self.transport_error(e)
            })?;
        let response = Self::check_status(response).await?;

        let history = response.json::<Vec<Message>>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse thread history: {}", e),
                Some(Box::new(e)),
            )
        })?;
        if let Some(logger) = &self.logger {
            logger.log_history(thread_id, &history);
        }
        Ok(history)
    }

    async fn delete_thread(&self, thread_id: &ThreadId) -> Result<()> {
        observability::CLIENT_REQUESTS.click();
        let url = format!("{}thread/{}", self.base_url, thread_id);

        let response = self
            .client
            .delete(&url)
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                self.transport_error(e)
            })?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url() {
        let backend = Backend::new().unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8080/api/");
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let backend =
            Backend::with_options(Some("http://example.com/api".to_string()), None).unwrap();
        assert_eq!(backend.base_url(), "http://example.com/api/");
    }

    #[test]
    fn invalid_base_url_rejected() {
        let err = Backend::with_options(Some("not a url".to_string()), None).unwrap_err();
        assert!(matches!(err, Error::Url { .. }));
    }
}
