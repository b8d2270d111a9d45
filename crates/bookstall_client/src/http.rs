//! HTTP transport abstraction.
//!
//! The actual HTTP client is abstracted via a trait so the gateway can run
//! against different implementations: [`ReqwestClient`] in production and
//! [`MockHttpClient`] in tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::{ClientError, ClientResult};

/// HTTP method subset used by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// DELETE.
    Delete,
}

/// Request body shapes the gateway can send.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// A JSON document.
    Json(serde_json::Value),
    /// A multipart form (file uploads).
    Multipart(MultipartForm),
}

/// A multipart form body.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    /// Form parts in submission order.
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        });
        self
    }
}

/// One part of a multipart form.
#[derive(Debug, Clone)]
pub enum FormPart {
    /// A plain text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// An uploaded file.
    File {
        /// Field name.
        name: String,
        /// Original file name.
        filename: String,
        /// MIME type.
        content_type: String,
        /// File contents.
        bytes: Vec<u8>,
    },
}

/// A fully-assembled outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    /// Query pairs.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
    /// Bearer token to attach, if the credential store holds one.
    pub bearer: Option<String>,
}

impl HttpRequest {
    /// Returns the value of a query pair, if present.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A raw response as seen by the gateway.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual transport. Errors are plain
/// strings describing a request that produced no response; the gateway maps
/// them into the network variant of the failure taxonomy.
pub trait HttpClient: Send + Sync + 'static {
    /// Executes a single request.
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, String>> + Send;
}

/// Production transport backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Builds a client with the given request timeout.
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { inner })
    }
}

fn build_multipart(form: MultipartForm) -> Result<reqwest::multipart::Form, String> {
    let mut multipart = reqwest::multipart::Form::new();
    for part in form.parts {
        multipart = match part {
            FormPart::Text { name, value } => multipart.text(name, value),
            FormPart::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                let file = reqwest::multipart::Part::bytes(bytes)
                    .file_name(filename)
                    .mime_str(&content_type)
                    .map_err(|e| e.to_string())?;
                multipart.part(name, file)
            }
        };
    }
    Ok(multipart)
}

impl HttpClient for ReqwestClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .inner
            .request(method, &request.url)
            .query(&request.query);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(build_multipart(form)?),
        };

        let response = builder.send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| e.to_string())?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

/// A scripted response for [`MockHttpClient`].
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    /// Status code to return.
    pub status: u16,
    /// Body bytes to return.
    pub body: Vec<u8>,
    /// Simulated network latency before the response arrives.
    pub latency: Duration,
}

impl ScriptedResponse {
    /// Creates a response with the given status and JSON body.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
            latency: Duration::ZERO,
        }
    }

    /// Creates a 200 success envelope wrapping the given result.
    pub fn envelope(result: &serde_json::Value) -> Self {
        Self::json(
            200,
            &serde_json::json!({ "success": true, "message": "OK", "result": result }),
        )
    }

    /// Creates a failure envelope with the given status and message.
    pub fn failure(status: u16, message: &str) -> Self {
        Self::json(
            status,
            &serde_json::json!({ "success": false, "message": message, "result": null }),
        )
    }

    /// Adds simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// A mock transport for testing.
///
/// Responses are scripted FIFO; each executed request is recorded so tests
/// can assert on what was actually sent. Cloning the mock shares the same
/// script and log, so a handle kept by the test observes requests issued
/// through the gateway.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttpClient {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scripted response.
    pub fn enqueue(&self, response: ScriptedResponse) {
        self.inner.responses.lock().push_back(response);
    }

    /// Returns all requests executed so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.lock().clone()
    }

    /// Returns the number of requests executed so far.
    pub fn request_count(&self) -> usize {
        self.inner.requests.lock().len()
    }
}

impl HttpClient for MockHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        self.inner.requests.lock().push(request);
        let scripted = self
            .inner
            .responses
            .lock()
            .pop_front()
            .ok_or_else(|| "no scripted response queued".to_string())?;
        if !scripted.latency.is_zero() {
            tokio::time::sleep(scripted.latency).await;
        }
        Ok(HttpResponse {
            status: scripted.status,
            body: scripted.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_scripted_responses_in_order() {
        let mock = MockHttpClient::new();
        mock.enqueue(ScriptedResponse::json(200, &serde_json::json!({"n": 1})));
        mock.enqueue(ScriptedResponse::json(500, &serde_json::json!({"n": 2})));

        let request = HttpRequest {
            method: Method::Get,
            url: "http://test/first".into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
        };

        let first = mock.execute(request.clone()).await.unwrap();
        assert_eq!(first.status, 200);
        let second = mock.execute(request).await.unwrap();
        assert_eq!(second.status, 500);
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn mock_fails_without_script() {
        let mock = MockHttpClient::new();
        let request = HttpRequest {
            method: Method::Delete,
            url: "http://test/x".into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
        };
        let err = mock.execute(request).await.unwrap_err();
        assert!(err.contains("no scripted response"));
        // The attempt is still recorded.
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn multipart_form_builder_orders_parts() {
        let form = MultipartForm::new()
            .text("bookName", "The Hobbit")
            .file("cover", "cover.png", "image/png", vec![1, 2, 3]);
        assert_eq!(form.parts.len(), 2);
        assert!(matches!(form.parts[0], FormPart::Text { .. }));
        assert!(matches!(form.parts[1], FormPart::File { .. }));
    }

    #[test]
    fn query_value_lookup() {
        let request = HttpRequest {
            method: Method::Get,
            url: "http://test/list".into(),
            query: vec![("keyword".into(), "tolkien".into())],
            body: RequestBody::Empty,
            bearer: None,
        };
        assert_eq!(request.query_value("keyword"), Some("tolkien"));
        assert_eq!(request.query_value("index"), None);
    }
}
