use crate::config::BankConfig;
use crate::payments::error::{
    PaymentError, PaymentResult, INTERNAL_ERROR_MESSAGE, REQUEST_ERROR_MESSAGE,
};
use crate::payments::provider::BankAuthorizer;
use crate::payments::types::{BankPaymentRequest, BankPaymentResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// HTTP client for the acquiring bank's `/payments` endpoint.
///
/// Makes exactly one attempt per call. `BANK_RETRY` and `BANK_RETRY_DELAY`
/// are read into [`BankConfig`] but not acted on here.
#[derive(Clone)]
pub struct BankClient {
    client: Client,
    payments_url: String,
    timeout: Duration,
}

impl BankClient {
    pub fn new(config: &BankConfig) -> PaymentResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            error!(error = %e, "failed to initialize bank HTTP client");
            PaymentError::internal(INTERNAL_ERROR_MESSAGE)
        })?;

        Ok(Self {
            client,
            payments_url: format!("{}/payments", config.url.trim_end_matches('/')),
            timeout,
        })
    }

    pub fn payments_url(&self) -> &str {
        &self.payments_url
    }
}

#[async_trait]
impl BankAuthorizer for BankClient {
    async fn authorize(&self, request: BankPaymentRequest) -> PaymentResult<BankPaymentResponse> {
        debug!(url = %self.payments_url, currency = %request.currency, "calling bank");

        let response = self
            .client
            .post(&self.payments_url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // Our side of the call failed: DNS, refused connection, timeout.
                error!(error = %e, timeout = e.is_timeout(), "Request error calling bank");
                PaymentError::internal(REQUEST_ERROR_MESSAGE)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!(error = %e, status = status.as_u16(), "Request error reading bank response");
            PaymentError::internal(REQUEST_ERROR_MESSAGE)
        })?;

        if status.is_client_error() {
            // A well-formed pipeline never sends a request the bank rejects.
            error!(status = status.as_u16(), body = %text, "Client error from bank");
            return Err(PaymentError::internal(INTERNAL_ERROR_MESSAGE));
        }

        if status.is_server_error() {
            error!(status = status.as_u16(), body = %text, "Server error from bank");
            return Err(PaymentError::DownstreamUnavailable);
        }

        if !status.is_success() {
            error!(status = status.as_u16(), body = %text, "Unexpected status from bank");
            return Err(PaymentError::internal(INTERNAL_ERROR_MESSAGE));
        }

        serde_json::from_str::<BankPaymentResponse>(&text).map_err(|e| {
            error!(error = %e, body = %text, "invalid bank JSON response");
            PaymentError::internal(INTERNAL_ERROR_MESSAGE)
        })
    }

    fn name(&self) -> &'static str {
        "bank"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use uuid::Uuid;

    fn config(url: String, timeout_secs: u64) -> BankConfig {
        BankConfig {
            url,
            timeout_secs,
            max_retries: 3,
            retry_delay_secs: 5,
        }
    }

    fn bank_request() -> BankPaymentRequest {
        BankPaymentRequest {
            card_number: "00001234".to_string(),
            expiry_date: "12/2036".to_string(),
            currency: "GBP".to_string(),
            amount: 100,
            cvv: "345".to_string(),
        }
    }

    #[test]
    fn payments_url_is_joined_without_double_slash() {
        let client = BankClient::new(&config("http://bank.local/".to_string(), 10)).unwrap();
        assert_eq!(client.payments_url(), "http://bank.local/payments");
    }

    #[tokio::test]
    async fn authorized_and_declined_responses_parse() {
        for authorized in [true, false] {
            let server = MockServer::start_async().await;
            let code = Uuid::new_v4();
            let mock = server
                .mock_async(|when, then| {
                    when.method(POST).path("/payments").json_body(json!({
                        "card_number": "00001234",
                        "expiry_date": "12/2036",
                        "currency": "GBP",
                        "amount": 100,
                        "cvv": "345"
                    }));
                    then.status(200)
                        .json_body(json!({"authorized": authorized, "authorization_code": code}));
                })
                .await;

            let client = BankClient::new(&config(server.base_url(), 10)).unwrap();
            let response = client.authorize(bank_request()).await.unwrap();

            assert_eq!(response.authorized, authorized);
            assert_eq!(response.authorization_code, Some(code));
            mock.assert_async().await;
        }
    }

    #[tokio::test]
    async fn empty_authorization_code_is_absent() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/payments");
                then.status(200)
                    .json_body(json!({"authorized": false, "authorization_code": ""}));
            })
            .await;

        let client = BankClient::new(&config(server.base_url(), 10)).unwrap();
        let response = client.authorize(bank_request()).await.unwrap();
        assert!(!response.authorized);
        assert_eq!(response.authorization_code, None);
    }

    #[tokio::test]
    async fn client_error_is_internal() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/payments");
                then.status(400).body("bad expiry_date");
            })
            .await;

        let client = BankClient::new(&config(server.base_url(), 10)).unwrap();
        let err = client.authorize(bank_request()).await.unwrap_err();

        assert_eq!(err, PaymentError::internal(INTERNAL_ERROR_MESSAGE));
        assert!(!err.user_message().contains("expiry_date"));
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn server_error_is_downstream_unavailable_without_retry() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/payments");
                then.status(503);
            })
            .await;

        let client = BankClient::new(&config(server.base_url(), 10)).unwrap();
        let err = client.authorize(bank_request()).await.unwrap_err();

        assert_eq!(err, PaymentError::DownstreamUnavailable);
        assert_eq!(
            err.user_message(),
            "Downstream bank server is unavailable, please retry later."
        );
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn invalid_success_body_is_internal() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/payments");
                then.status(200).body("<html>ok</html>");
            })
            .await;

        let client = BankClient::new(&config(server.base_url(), 10)).unwrap();
        let err = client.authorize(bank_request()).await.unwrap_err();
        assert_eq!(err, PaymentError::internal(INTERNAL_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn connection_refused_is_request_error() {
        let client = BankClient::new(&config("http://127.0.0.1:1".to_string(), 2)).unwrap();
        let err = client.authorize(bank_request()).await.unwrap_err();
        assert_eq!(err, PaymentError::internal(REQUEST_ERROR_MESSAGE));
        assert_eq!(err.http_status_code(), 500);
    }

    #[tokio::test]
    async fn truncated_body_is_request_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 200\r\n\r\n{\"authoriz",
                )
                .await;
            let _ = socket.shutdown().await;
        });

        let client = BankClient::new(&config(format!("http://{}", addr), 5)).unwrap();
        let err = client.authorize(bank_request()).await.unwrap_err();
        assert_eq!(err, PaymentError::internal(REQUEST_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn timeout_is_request_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/payments");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(json!({"authorized": true}));
            })
            .await;

        let client = BankClient::new(&config(server.base_url(), 1)).unwrap();
        let err = client.authorize(bank_request()).await.unwrap_err();
        assert_eq!(err, PaymentError::internal(REQUEST_ERROR_MESSAGE));
    }
}
