//! HTTP client with built-in retry logic and error handling.

use log::debug;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::retry::{self, Failure, RetryError, RetryPolicy};

/// HTTP client that routes every request through the retry executor.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    policy: RetryPolicy,
}

impl HttpClient {
    /// Creates an HTTP client with the default retry policy.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            policy: RetryPolicy::default(),
        }
    }

    /// Creates an HTTP client with an explicit retry policy.
    pub fn with_policy(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Performs a GET request and deserializes the JSON response.
    /// Automatically retries on transient errors.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RetryError> {
        debug!("GET JSON from {}...", url);

        retry::execute("GET JSON", &self.policy, || async {
            let response = self.client.get(url).send().await?;
            read_json(response).await
        })
        .await
    }

    /// Performs a POST request with a JSON body and deserializes the JSON
    /// response. Automatically retries on transient errors.
    #[tracing::instrument(skip(self, body))]
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, RetryError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST JSON to {}...", url);

        retry::execute("POST JSON", &self.policy, || async {
            let response = self.client.post(url).json(body).send().await?;
            read_json(response).await
        })
        .await
    }
}

/// Converts a response into a deserialized body, or a classified [`Failure`]
/// for non-2xx statuses.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, Failure> {
    let status = response.status();

    if !status.is_success() {
        let message = error_detail(response)
            .await
            .unwrap_or_else(|| format!("HTTP {} error", status.as_u16()));
        return Err(Failure::from_status(status.as_u16(), message));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| Failure::unknown(format!("Failed to parse JSON response: {}", e)))
}

/// Extracts the `detail` field the backend puts in error bodies, if any.
async fn error_detail(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let value: serde_json::Value = serde_json::from_str(&body).ok()?;
    value.get("detail")?.as_str().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::FailureKind;
    use std::time::Duration;

    fn fast_client(max_attempts: u32) -> HttpClient {
        let policy = RetryPolicy::new(max_attempts, Duration::from_millis(10)).unwrap();
        HttpClient::with_policy(Client::new(), policy)
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "test", "value": 42}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());

        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct TestResponse {
            name: String,
            value: i32,
        }

        let result: TestResponse = client.get_json(&format!("{}/test", url)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.name, "test");
        assert_eq!(result.value, 42);
    }

    #[tokio::test]
    async fn test_post_json_success() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/echo")
            .match_body(mockito::Matcher::Json(serde_json::json!({"topic": "Rust"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: serde_json::Value = client
            .post_json(&format!("{}/echo", url), &serde_json::json!({"topic": "Rust"}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result["ok"], true);
    }

    #[tokio::test]
    async fn test_get_json_not_found_fails_without_retry() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let client = fast_client(3);
        let result: Result<serde_json::Value, _> =
            client.get_json(&format!("{}/missing", url)).await;

        mock.assert_async().await;
        let error = result.unwrap_err();
        assert_eq!(error.attempts, 1);
        assert_eq!(error.failure.status, Some(404));
        assert_eq!(error.failure.kind, FailureKind::Client);
    }

    #[tokio::test]
    async fn test_post_json_server_error_exhausts_attempts() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/quiz")
            .with_status(500)
            .expect(3)
            .create_async()
            .await;

        let client = fast_client(3);
        let result: Result<serde_json::Value, _> = client
            .post_json(&format!("{}/quiz", url), &serde_json::json!({}))
            .await;

        mock.assert_async().await;
        let error = result.unwrap_err();
        assert_eq!(error.attempts, 3);
        assert_eq!(error.failure.status, Some(500));
    }

    #[tokio::test]
    async fn test_error_body_detail_becomes_failure_message() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/quiz")
            .with_status(422)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "topic must not be empty"}"#)
            .create_async()
            .await;

        let client = fast_client(3);
        let result: Result<serde_json::Value, _> = client
            .post_json(&format!("{}/quiz", url), &serde_json::json!({}))
            .await;

        mock.assert_async().await;
        let error = result.unwrap_err();
        assert_eq!(error.failure.status, Some(422));
        assert_eq!(error.failure.message, "topic must not be empty");
    }

    #[tokio::test]
    async fn test_error_without_detail_gets_generic_message() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/broken")
            .with_status(502)
            .with_body("bad gateway")
            .expect(2)
            .create_async()
            .await;

        let client = fast_client(2);
        let result: Result<serde_json::Value, _> =
            client.get_json(&format!("{}/broken", url)).await;

        let error = result.unwrap_err();
        assert_eq!(error.failure.message, "HTTP 502 error");
    }

    #[tokio::test]
    async fn test_malformed_body_is_terminal() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/garbled")
            .with_status(200)
            .with_body("not json")
            .expect(1)
            .create_async()
            .await;

        let client = fast_client(3);
        let result: Result<serde_json::Value, _> =
            client.get_json(&format!("{}/garbled", url)).await;

        mock.assert_async().await;
        let error = result.unwrap_err();
        // Parse failures are Unknown and not retried
        assert_eq!(error.attempts, 1);
        assert_eq!(error.failure.kind, FailureKind::Unknown);
    }

    #[tokio::test]
    async fn test_connection_failure_is_retried() {
        // Nothing listens on this port, so every attempt is a transport fault
        let client = fast_client(2);
        let result: Result<serde_json::Value, _> =
            client.get_json("http://127.0.0.1:1/unreachable").await;

        let error = result.unwrap_err();
        assert_eq!(error.attempts, 2);
        assert_eq!(error.failure.kind, FailureKind::Server);
        assert_eq!(error.failure.status, None);
    }
}
