//! Fraud-detection client implementation

use std::sync::Arc;

use async_trait::async_trait;
use finsec_domain::Row;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::{
    config::DetectionConfig,
    error::{HttpError, Result},
};

/// Why a request never produced a usable response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    /// The 200 body was not a JSON object
    Decode,
    Other,
}

impl TransportErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Decode => "decode",
            TransportErrorKind::Other => "other",
        }
    }

    fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_decode() {
            TransportErrorKind::Decode
        } else {
            TransportErrorKind::Other
        }
    }
}

/// Result of asking the detection API about one row
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionOutcome {
    /// HTTP 200 with a JSON object to merge into the row
    Detected(Map<String, Value>),
    /// Any status other than 200
    HttpError(StatusCode),
    /// The request failed before a usable response arrived
    TransportError(TransportErrorKind),
}

/// Mockable detection client
#[async_trait]
pub trait DetectionClient: Send + Sync {
    /// Submit one row and wait for the verdict
    async fn detect(&self, row: &Row) -> DetectionOutcome;
}

/// Production detection client
pub struct HttpDetectionClient {
    inner: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl HttpDetectionClient {
    /// Create a new detection client
    pub fn new(config: DetectionConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .parse::<Url>()
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        Ok(Self {
            inner,
            endpoint,
            api_key: config.api_key,
        })
    }

    /// Endpoint receiving detection requests
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DetectionClient for HttpDetectionClient {
    async fn detect(&self, row: &Row) -> DetectionOutcome {
        debug!("HTTP POST: {}", self.endpoint);

        let response = match self
            .inner
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&Value::Object(row.to_json_object()))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return DetectionOutcome::TransportError(TransportErrorKind::classify(&err)),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return DetectionOutcome::HttpError(status);
        }

        match response.json::<Value>().await {
            Ok(Value::Object(fields)) => DetectionOutcome::Detected(fields),
            Ok(_) => DetectionOutcome::TransportError(TransportErrorKind::Decode),
            Err(err) => DetectionOutcome::TransportError(TransportErrorKind::classify(&err)),
        }
    }
}

/// Create a shared detection client (Arc-wrapped for cloning)
pub fn shared_client(config: DetectionConfig) -> Result<Arc<dyn DetectionClient>> {
    Ok(Arc::new(HttpDetectionClient::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsec_domain::CellValue;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn sample_row() -> Row {
        [
            ("amt", CellValue::Number(40.0)),
            ("merchant", CellValue::from("acme")),
            ("note", CellValue::Empty),
        ]
        .into_iter()
        .collect()
    }

    fn client_for(server: &MockServer) -> HttpDetectionClient {
        let config = DetectionConfig::new(format!("{}/detect", server.uri()), "test-token")
            .with_timeout(Duration::from_millis(300));
        HttpDetectionClient::new(config).unwrap()
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = HttpDetectionClient::new(DetectionConfig::new("not a url", "t"));
        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }

    #[test]
    fn test_shared_client_creation() {
        let client = shared_client(DetectionConfig::new("https://detect.example.com/detect", "t"));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_success_returns_body_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/detect"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({"amt": 40, "merchant": "acme", "note": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"risk": "low"})))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).detect(&sample_row()).await;

        let expected = json!({"risk": "low"}).as_object().cloned().unwrap();
        assert_eq!(outcome, DetectionOutcome::Detected(expected));
    }

    #[tokio::test]
    async fn test_non_200_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let outcome = client_for(&server).detect(&sample_row()).await;
        assert_eq!(
            outcome,
            DetectionOutcome::HttpError(StatusCode::SERVICE_UNAVAILABLE)
        );
    }

    #[tokio::test]
    async fn test_other_success_codes_are_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"risk": "low"})))
            .mount(&server)
            .await;

        let outcome = client_for(&server).detect(&sample_row()).await;
        assert_eq!(outcome, DetectionOutcome::HttpError(StatusCode::CREATED));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"risk": "low"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server).detect(&sample_row()).await;
        assert_eq!(
            outcome,
            DetectionOutcome::TransportError(TransportErrorKind::Timeout)
        );
    }

    #[tokio::test]
    async fn test_non_object_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["low"])))
            .mount(&server)
            .await;

        let outcome = client_for(&server).detect(&sample_row()).await;
        assert_eq!(
            outcome,
            DetectionOutcome::TransportError(TransportErrorKind::Decode)
        );
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let outcome = client_for(&server).detect(&sample_row()).await;
        assert_eq!(
            outcome,
            DetectionOutcome::TransportError(TransportErrorKind::Decode)
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let config = DetectionConfig::new(format!("{uri}/detect"), "t")
            .with_timeout(Duration::from_millis(300));
        let outcome = HttpDetectionClient::new(config)
            .unwrap()
            .detect(&sample_row())
            .await;

        assert!(matches!(outcome, DetectionOutcome::TransportError(_)));
    }
}
