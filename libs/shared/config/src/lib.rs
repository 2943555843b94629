use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rest_base_url: String,
    pub rest_service_key: String,
    pub admin_jwt_secret: String,
    pub mail_api_url: String,
    pub mail_api_token: String,
    pub mail_from: String,
    pub mail_copy_to: Option<String>,
    pub local_utc_offset_hours: i32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            rest_base_url: env::var("REST_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("REST_BASE_URL not set, using empty value");
                    String::new()
                }),
            rest_service_key: env::var("REST_SERVICE_KEY")
                .unwrap_or_else(|_| {
                    warn!("REST_SERVICE_KEY not set, using empty value");
                    String::new()
                }),
            admin_jwt_secret: env::var("ADMIN_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("ADMIN_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            mail_api_url: env::var("MAIL_API_URL")
                .unwrap_or_else(|_| {
                    warn!("MAIL_API_URL not set, using empty value");
                    String::new()
                }),
            mail_api_token: env::var("MAIL_API_TOKEN")
                .unwrap_or_else(|_| {
                    warn!("MAIL_API_TOKEN not set, using empty value");
                    String::new()
                }),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| {
                    warn!("MAIL_FROM not set, using default");
                    "contato@sabinadecor.com.br".to_string()
                }),
            mail_copy_to: env::var("MAIL_COPY_TO").ok().filter(|v| !v.is_empty()),
            local_utc_offset_hours: env::var("LOCAL_UTC_OFFSET_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(-3),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.rest_base_url.is_empty()
            && !self.rest_service_key.is_empty()
            && !self.admin_jwt_secret.is_empty()
    }

    pub fn is_mail_configured(&self) -> bool {
        !self.mail_api_url.is_empty()
            && !self.mail_api_token.is_empty()
            && !self.mail_from.is_empty()
    }
}
