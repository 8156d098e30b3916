use async_trait::async_trait;
use reqwest::Client;

use super::{MailError, Mailer, OutboundEmail};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Mailer backed by the Resend HTTP API.
pub struct ResendMailer {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>) -> Self {
        ResendMailer {
            http: Client::new(),
            api_key: api_key.into(),
            endpoint: RESEND_ENDPOINT.to_string(),
        }
    }

    /// Point at a non-default endpoint (local stub, staging).
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        ResendMailer {
            http: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "from": email.from,
                "to": [email.to],
                "subject": email.subject,
                "html": email.html,
            }))
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(MailError::Rejected(format!("{status}: {body}")))
        }
    }
}
