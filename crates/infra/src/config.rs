use beacon_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign and verify api access tokens
    pub jwt_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// Base url used when building links that leave the service: one-click
    /// action links in emails and the calendar feed path.
    pub external_base_url: String,
    /// Address used as the sender of notification emails
    pub email_from: String,
    /// Endpoint of the external email delivery provider. When unset,
    /// outbound email is logged and dropped.
    pub email_api_url: Option<String>,
    /// Api key for the email delivery provider
    pub email_api_key: Option<String>,
    /// How many days of completed/ignored occurrences the history view
    /// reaches back.
    pub history_window_days: i64,
}

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find JWT_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!("Generated a JWT secret for this process. Tokens will not survive a restart.");
                secret
            }
        };

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let external_base_url = std::env::var("EXTERNAL_BASE_URL").unwrap_or_else(|_| {
            let fallback = format!("http://localhost:{}", port);
            info!(
                "Did not find EXTERNAL_BASE_URL environment variable, using: {}",
                fallback
            );
            fallback
        });

        let email_from =
            std::env::var("EMAIL_FROM").unwrap_or_else(|_| "reminders@beacon.local".into());
        let email_api_url = std::env::var("EMAIL_API_URL").ok();
        let email_api_key = std::env::var("EMAIL_API_KEY").ok();
        if email_api_url.is_none() {
            info!("Did not find EMAIL_API_URL environment variable. Notification emails will be logged and dropped.");
        }

        Self {
            jwt_secret,
            port,
            external_base_url,
            email_from,
            email_api_url,
            email_api_key,
            history_window_days: 90,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
