use crate::config::Config;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

/// An outbound notification email, already rendered.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// External email delivery. One call per message, no internal retry; the
/// notification scheduler relies on its send-log to retry on the next tick
/// instead.
#[async_trait::async_trait]
pub trait IEmailProvider: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()>;
}

pub fn provider_from_config(config: &Config) -> Arc<dyn IEmailProvider> {
    match &config.email_api_url {
        Some(api_url) => Arc::new(HttpEmailProvider::new(
            api_url.clone(),
            config.email_api_key.clone(),
            config.email_from.clone(),
        )),
        None => Arc::new(NoopEmailProvider::default()),
    }
}

/// Delivers mail through an HTTP email api (single JSON POST per message).
pub struct HttpEmailProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
}

#[derive(Serialize)]
struct EmailApiRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl HttpEmailProvider {
    pub fn new(api_url: String, api_key: Option<String>, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait::async_trait]
impl IEmailProvider for HttpEmailProvider {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let body = EmailApiRequest {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html_body,
            text: &message.text_body,
        };

        let mut req = self.client.post(&self.api_url).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let response_body = res.text().await.unwrap_or_default();
            error!(
                "Email provider returned status: {} with body: {}",
                status, response_body
            );
            anyhow::bail!("Email provider returned status: {}", status);
        }
        Ok(())
    }
}

/// Used when no email provider is configured: logs the message and reports
/// success so the send-log still records the occurrence.
#[derive(Default)]
pub struct NoopEmailProvider {}

#[async_trait::async_trait]
impl IEmailProvider for NoopEmailProvider {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        info!(
            "No email provider configured, dropping email to: {} with subject: {}",
            message.to, message.subject
        );
        Ok(())
    }
}

/// Test provider that records every message and can be told to fail.
#[derive(Default)]
pub struct RecordingEmailProvider {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: Mutex<bool>,
}

impl RecordingEmailProvider {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

#[async_trait::async_trait]
impl IEmailProvider for RecordingEmailProvider {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        if *self.fail.lock().unwrap() {
            anyhow::bail!("email delivery failed");
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
