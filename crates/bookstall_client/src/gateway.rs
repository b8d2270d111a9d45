//! The authenticated HTTP gateway.
//!
//! Every request from the session manager and the collection stores goes
//! through one gateway. The gateway attaches the bearer credential when the
//! store holds one, decodes the response envelope, and classifies failures.
//! It never retries, never refreshes tokens and never swallows an error;
//! recovery is the caller's responsibility.

use std::sync::Arc;

use bookstall_protocol::{classify_status, ApiError, ApiResult, Envelope};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::http::{HttpClient, HttpRequest, HttpResponse, Method, MultipartForm, RequestBody};

/// The shared HTTP gateway.
pub struct Gateway<C: HttpClient, S: CredentialStore> {
    base_url: String,
    client: C,
    credentials: Arc<S>,
}

impl<C: HttpClient, S: CredentialStore> Gateway<C, S> {
    /// Creates a gateway over the given transport and credential store.
    pub fn new(config: &ClientConfig, client: C, credentials: Arc<S>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            client,
            credentials,
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: RequestBody,
    ) -> ApiResult<HttpResponse> {
        let bearer = self.credentials.load().map(|pair| pair.access_token);
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            query,
            body,
            bearer,
        };
        tracing::debug!(method = ?request.method, url = %request.url, "dispatching request");
        self.client.execute(request).await.map_err(ApiError::Network)
    }

    fn decode<T: DeserializeOwned>(response: HttpResponse) -> ApiResult<Envelope<T>> {
        if !(200u16..300).contains(&response.status) {
            let message = envelope_message(&response.body)
                .unwrap_or_else(|| format!("request failed with status {}", response.status));
            return Err(classify_status(response.status, message));
        }
        let envelope: Envelope<T> =
            serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !envelope.success {
            return Err(ApiError::Rejected {
                message: envelope.message,
            });
        }
        Ok(envelope)
    }

    /// Issues a GET and decodes the envelope.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ApiResult<Envelope<T>> {
        let response = self.send(Method::Get, path, query, RequestBody::Empty).await?;
        Self::decode(response)
    }

    /// Issues a POST with a JSON body and decodes the envelope.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        body: &B,
    ) -> ApiResult<Envelope<T>> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self
            .send(Method::Post, path, query, RequestBody::Json(value))
            .await?;
        Self::decode(response)
    }

    /// Issues a POST with a multipart body and decodes the envelope.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
    ) -> ApiResult<Envelope<T>> {
        let response = self
            .send(Method::Post, path, Vec::new(), RequestBody::Multipart(form))
            .await?;
        Self::decode(response)
    }

    /// Issues a PUT with a JSON body and decodes the envelope.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Envelope<T>> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self
            .send(Method::Put, path, Vec::new(), RequestBody::Json(value))
            .await?;
        Self::decode(response)
    }

    /// Issues a DELETE and decodes the envelope.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Envelope<T>> {
        let response = self
            .send(Method::Delete, path, Vec::new(), RequestBody::Empty)
            .await?;
        Self::decode(response)
    }
}

/// Pulls the envelope message out of an error body, if there is one.
fn envelope_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use crate::http::{MockHttpClient, ScriptedResponse};
    use bookstall_protocol::TokenPair;
    use serde_json::json;

    fn gateway(
        mock: &MockHttpClient,
        credentials: Arc<MemoryCredentialStore>,
    ) -> Gateway<MockHttpClient, MemoryCredentialStore> {
        let config = ClientConfig::new("http://shop.test");
        Gateway::new(&config, mock.clone(), credentials)
    }

    #[tokio::test]
    async fn attaches_bearer_when_credentials_exist() {
        let mock = MockHttpClient::new();
        mock.enqueue(ScriptedResponse::envelope(&json!(null)));
        let credentials = Arc::new(MemoryCredentialStore::with_pair(TokenPair::new(
            "tok-123", "ref-456",
        )));

        let gateway = gateway(&mock, credentials);
        gateway
            .get::<serde_json::Value>("/admin/authors", Vec::new())
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].bearer.as_deref(), Some("tok-123"));
        assert_eq!(requests[0].url, "http://shop.test/admin/authors");
    }

    #[tokio::test]
    async fn proceeds_unauthenticated_without_credentials() {
        let mock = MockHttpClient::new();
        mock.enqueue(ScriptedResponse::envelope(&json!(null)));

        let gateway = gateway(&mock, Arc::new(MemoryCredentialStore::new()));
        gateway
            .get::<serde_json::Value>("/auth/login", Vec::new())
            .await
            .unwrap();

        assert_eq!(mock.requests()[0].bearer, None);
    }

    #[tokio::test]
    async fn classifies_http_failures_preserving_message() {
        let mock = MockHttpClient::new();
        mock.enqueue(ScriptedResponse::failure(404, "author 9 is gone"));

        let gateway = gateway(&mock, Arc::new(MemoryCredentialStore::new()));
        let err = gateway
            .get::<serde_json::Value>("/admin/authors/9", Vec::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::NotFound {
                message: "author 9 is gone".into()
            }
        );
    }

    #[tokio::test]
    async fn rejected_envelope_surfaces_message() {
        let mock = MockHttpClient::new();
        mock.enqueue(ScriptedResponse::json(
            200,
            &json!({"success": false, "message": "duplicate name", "result": null}),
        ));

        let gateway = gateway(&mock, Arc::new(MemoryCredentialStore::new()));
        let err = gateway
            .post::<serde_json::Value, _>("/admin/authors", Vec::new(), &json!({"authorName": "x"}))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Rejected {
                message: "duplicate name".into()
            }
        );
    }

    #[tokio::test]
    async fn transport_failure_maps_to_network_error() {
        let mock = MockHttpClient::new(); // nothing scripted -> transport error
        let gateway = gateway(&mock, Arc::new(MemoryCredentialStore::new()));
        let err = gateway
            .get::<serde_json::Value>("/admin/books", Vec::new())
            .await
            .unwrap_err();
        assert!(err.is_network());
        // One attempt only: the gateway never retries.
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let mock = MockHttpClient::new();
        mock.enqueue(ScriptedResponse {
            status: 200,
            body: b"<html>proxy error</html>".to_vec(),
            latency: std::time::Duration::ZERO,
        });

        let gateway = gateway(&mock, Arc::new(MemoryCredentialStore::new()));
        let err = gateway
            .get::<serde_json::Value>("/admin/books", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
