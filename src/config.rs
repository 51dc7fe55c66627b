use std::env;

use tracing::warn;

/// SMTP settings. Present only when SMTP_HOST is configured; otherwise the
/// logging email transport is used.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    pub encryption: String,
    pub contact_recipient: String,
}

/// Application configuration, read from the environment exactly once in
/// `main` and handed to components at construction time.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
    pub places_api_key: Option<String>,
    pub places_base_url: String,
    pub allowed_origins: Vec<String>,
    pub base_url: String,
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid port number"))?;

        let secret_key = match env::var("SECRET_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => {
                warn!("SECRET_KEY not set; using insecure development default");
                "dev-secret-key-change-me".to_string()
            }
        };

        // 8 days, matching the issued token lifetime of the service this
        // API fronts.
        let access_token_expire_minutes = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(60 * 24 * 8);

        let places_api_key = env::var("PLACES_API_KEY").ok().filter(|k| !k.is_empty());
        let places_base_url = env::var("PLACES_BASE_URL")
            .unwrap_or_else(|_| "https://maps.googleapis.com".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        let smtp = Self::smtp_from_env()?;

        Ok(AppConfig {
            database_url,
            host,
            port,
            secret_key,
            access_token_expire_minutes,
            places_api_key,
            places_base_url,
            allowed_origins,
            base_url,
            smtp,
        })
    }

    fn smtp_from_env() -> Result<Option<SmtpConfig>, anyhow::Error> {
        let host = match env::var("SMTP_HOST") {
            Ok(host) if !host.is_empty() => host,
            _ => return Ok(None),
        };

        let port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("Invalid SMTP_PORT"))?;
        let username =
            env::var("SMTP_USERNAME").map_err(|_| anyhow::anyhow!("SMTP_USERNAME not set"))?;
        let password =
            env::var("SMTP_PASSWORD").map_err(|_| anyhow::anyhow!("SMTP_PASSWORD not set"))?;
        let from_email =
            env::var("SMTP_FROM_EMAIL").map_err(|_| anyhow::anyhow!("SMTP_FROM_EMAIL not set"))?;
        let from_name = env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Wayfarer".to_string());
        let encryption = env::var("SMTP_ENCRYPTION").unwrap_or_else(|_| "starttls".to_string());
        let contact_recipient =
            env::var("CONTACT_RECIPIENT").unwrap_or_else(|_| from_email.clone());

        Ok(Some(SmtpConfig {
            host,
            port,
            username,
            password,
            from_email,
            from_name,
            encryption,
            contact_recipient,
        }))
    }

    pub fn allow_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}
