use std::time::Duration;

use reqwest::Method;
use tracing::{info, warn};

use super::client::{check, ApiClient};
use crate::error::ApiError;
use crate::model::ContactForm;
use crate::storage::ContactConfig;

/// Linear backoff: attempt `n` waits `backoff * n` before retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl From<&ContactConfig> for RetryPolicy {
    fn from(config: &ContactConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: config.backoff(),
        }
    }
}

impl ApiClient {
    /// Submit the contact form, retrying transport failures and 5xx
    /// responses. 4xx responses are returned without retrying.
    pub async fn submit_contact(
        &self,
        form: &ContactForm,
        policy: RetryPolicy,
    ) -> Result<(), ApiError> {
        let max_attempts = policy.max_attempts.max(1);
        let url = self.endpoint(&["api", "contact"])?;
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = match self.request(Method::POST, url.clone(), false) {
                Ok(builder) => match builder.json(form).send().await {
                    Ok(resp) => check(resp).await.map(|_| ()),
                    Err(e) => Err(ApiError::Transport(e)),
                },
                Err(e) => return Err(e),
            };

            let err = match result {
                Ok(()) => {
                    info!(attempt, "contact form submitted");
                    return Ok(());
                }
                Err(e) if !is_retryable(&e) => return Err(e),
                Err(e) => e,
            };

            if attempt >= max_attempts {
                return Err(ApiError::RetriesExhausted {
                    attempts: attempt,
                    last: err.to_string(),
                });
            }
            let wait = policy.backoff * attempt;
            warn!(attempt, ?wait, error = %err, "contact submission failed, retrying");
            tokio::time::sleep(wait).await;
        }
    }
}

fn is_retryable(err: &ApiError) -> bool {
    match err {
        ApiError::Transport(_) => true,
        ApiError::Status { code, .. } => *code >= 500,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            message: "Do you ship programs abroad?".into(),
        }
    }

    fn fast() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            backoff: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn succeeds_on_first_attempt() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/contact")
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;
        let client = ApiClient::new(&server.url()).unwrap();
        client.submit_contact(&form(), fast()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn retries_server_errors_until_exhausted() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/contact")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;
        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.submit_contact(&form(), fast()).await.unwrap_err();
        assert!(matches!(err, ApiError::RetriesExhausted { attempts: 3, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/contact")
            .with_status(400)
            .with_body(r#"{"message":"email is required"}"#)
            .expect(1)
            .create_async()
            .await;
        let client = ApiClient::new(&server.url()).unwrap();
        match client.submit_contact(&form(), fast()).await {
            Err(ApiError::Status { code, message }) => {
                assert_eq!(code, 400);
                assert_eq!(message, "email is required");
            }
            other => panic!("unexpected {other:?}"),
        }
        mock.assert_async().await;
    }

    #[test]
    fn policy_from_config_never_drops_below_one_attempt() {
        let config = ContactConfig {
            max_attempts: 0,
            backoff_ms: 250,
        };
        let policy = RetryPolicy::from(&config);
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.backoff, Duration::from_millis(250));
    }
}
