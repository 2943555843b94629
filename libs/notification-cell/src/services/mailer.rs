use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::NotificationError;

#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub subject: String,
    pub to: Vec<String>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

/// Client for the transactional mail HTTP API.
/// The wire protocol (SMTP relay behind the API) is the provider's problem.
pub struct MailerClient {
    client: Client,
    base_url: String,
    api_token: String,
    from: String,
}

impl MailerClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.mail_api_url.clone(),
            api_token: config.mail_api_token.clone(),
            from: config.mail_from.clone(),
        }
    }

    /// POST /messages
    pub async fn send(&self, email: &OutboundEmail) -> Result<(), NotificationError> {
        let url = format!("{}/messages", self.base_url);

        let request_body = SendMessageRequest {
            from: &self.from,
            to: &email.to,
            subject: &email.subject,
            text: &email.text,
            html: email.html.as_deref(),
        };

        debug!("Sending mail '{}' to {:?}", email.subject, email.to);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| NotificationError::TransportFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let response_text = response.text().await.unwrap_or_default();
            error!("Mail API error: {} - {}", status, response_text);
            return Err(NotificationError::TransportFailure(format!(
                "HTTP {}: {}",
                status, response_text
            )));
        }

        debug!("Mail '{}' accepted by transport", email.subject);
        Ok(())
    }
}
