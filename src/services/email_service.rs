use crate::config::{AppConfig, SmtpConfig};
use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Failed to build email message: {0}")]
    MessageBuild(String),
    #[error("Failed to send email: {0}")]
    SendFailed(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send_verification_email(&self, to_email: &str, token: &str) -> Result<(), EmailError>;
    async fn send_password_reset_email(
        &self,
        to_email: &str,
        token: &str,
    ) -> Result<(), EmailError>;
    async fn send_contact_message(
        &self,
        from_name: &str,
        from_email: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), EmailError>;
}

/// Logging transport: every message becomes a tracing record and nothing
/// leaves the process. Used whenever SMTP is not configured.
pub struct LogEmailService {
    base_url: String,
}

impl LogEmailService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl EmailService for LogEmailService {
    async fn send_verification_email(&self, to_email: &str, token: &str) -> Result<(), EmailError> {
        tracing::info!(
            "[EMAIL] Verification email to {to_email}: {}/verify-email?email={to_email}&token={token}",
            self.base_url
        );
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        to_email: &str,
        token: &str,
    ) -> Result<(), EmailError> {
        tracing::info!(
            "[EMAIL] Password reset email to {to_email}: {}/reset-password?email={to_email}&token={token}",
            self.base_url
        );
        Ok(())
    }

    async fn send_contact_message(
        &self,
        from_name: &str,
        from_email: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), EmailError> {
        tracing::info!(
            "[EMAIL] Contact form submission from {from_name} <{from_email}>: {subject} - {message}"
        );
        Ok(())
    }
}

pub struct SmtpEmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_email: String,
    from_name: String,
    contact_recipient: String,
    base_url: String,
}

impl SmtpEmailService {
    pub fn new(smtp: &SmtpConfig, base_url: &str) -> Result<Self, EmailError> {
        let credentials = Credentials::new(smtp.username.clone(), smtp.password.clone());

        let mailer = match smtp.encryption.to_lowercase().as_str() {
            "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
                .map_err(|e| EmailError::ConfigError(format!("SMTP relay error: {}", e)))?
                .port(smtp.port)
                .credentials(credentials)
                .build(),
            "starttls" => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
                .map_err(|e| EmailError::ConfigError(format!("SMTP starttls error: {}", e)))?
                .port(smtp.port)
                .credentials(credentials)
                .build(),
            "none" => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
                .port(smtp.port)
                .credentials(credentials)
                .build(),
            other => {
                return Err(EmailError::ConfigError(format!(
                    "Invalid SMTP_ENCRYPTION value: {}. Use 'tls', 'starttls', or 'none'",
                    other
                )))
            }
        };

        Ok(Self {
            mailer,
            from_email: smtp.from_email.clone(),
            from_name: smtp.from_name.clone(),
            contact_recipient: smtp.contact_recipient.clone(),
            base_url: base_url.to_string(),
        })
    }

    fn build_message(
        &self,
        to_email: &str,
        subject: &str,
        html_body: String,
    ) -> Result<Message, EmailError> {
        Message::builder()
            .from(
                format!("{} <{}>", self.from_name, self.from_email)
                    .parse()
                    .map_err(|e| EmailError::MessageBuild(format!("Invalid from address: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| EmailError::MessageBuild(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| EmailError::MessageBuild(e.to_string()))
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_verification_email(&self, to_email: &str, token: &str) -> Result<(), EmailError> {
        let verification_url = format!(
            "{}/verify-email?email={to_email}&token={token}",
            self.base_url
        );

        let html_body = format!(
            r#"
<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1 style="color: #333;">Welcome to Wayfarer!</h1>
    <p>Thank you for signing up. Please verify your email address by clicking the button below:</p>
    <p style="text-align: center; margin: 30px 0;">
        <a href="{}" style="background-color: #4CAF50; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px; display: inline-block;">Verify Email Address</a>
    </p>
    <p style="color: #666; font-size: 14px;">Or copy and paste this link into your browser:</p>
    <p style="color: #666; font-size: 14px; word-break: break-all;">{}</p>
</body>
</html>
"#,
            verification_url, verification_url
        );

        let email = self.build_message(to_email, "Verify your Wayfarer account", html_body)?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        to_email: &str,
        token: &str,
    ) -> Result<(), EmailError> {
        let reset_url = format!(
            "{}/reset-password?email={to_email}&token={token}",
            self.base_url
        );

        let html_body = format!(
            r#"
<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1 style="color: #333;">Reset your Wayfarer password</h1>
    <p>Click the button below to choose a new password:</p>
    <p style="text-align: center; margin: 30px 0;">
        <a href="{}" style="background-color: #2196F3; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px; display: inline-block;">Reset Password</a>
    </p>
    <p style="color: #666; font-size: 14px;">Or copy and paste this link into your browser:</p>
    <p style="color: #666; font-size: 14px; word-break: break-all;">{}</p>
    <p style="color: #999; font-size: 12px; margin-top: 40px;">This link will expire in 24 hours. If you didn't request a password reset, you can safely ignore this email.</p>
</body>
</html>
"#,
            reset_url, reset_url
        );

        let email = self.build_message(to_email, "Reset your Wayfarer password", html_body)?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        Ok(())
    }

    async fn send_contact_message(
        &self,
        from_name: &str,
        from_email: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), EmailError> {
        let html_body = format!(
            r#"
<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1 style="color: #333;">Contact Form Submission</h1>
    <div style="background-color: #f5f5f5; padding: 15px; border-radius: 4px; margin: 20px 0;">
        <p style="margin: 5px 0;"><strong>From:</strong> {} &lt;{}&gt;</p>
        <p style="margin: 5px 0;"><strong>Subject:</strong> {}</p>
    </div>
    <div style="background-color: #fff; padding: 15px; border: 1px solid #ddd; border-radius: 4px;">
        <p style="margin: 0; white-space: pre-wrap;">{}</p>
    </div>
</body>
</html>
"#,
            from_name, from_email, subject, message
        );

        let email = Message::builder()
            .from(
                format!("{} <{}>", self.from_name, self.from_email)
                    .parse()
                    .map_err(|e| EmailError::MessageBuild(format!("Invalid from address: {}", e)))?,
            )
            .reply_to(from_email.parse().map_err(|e| {
                EmailError::MessageBuild(format!("Invalid reply-to address: {}", e))
            })?)
            .to(self
                .contact_recipient
                .parse()
                .map_err(|e| EmailError::MessageBuild(format!("Invalid to address: {}", e)))?)
            .subject(format!("Contact form: {}", subject))
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| EmailError::MessageBuild(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        Ok(())
    }
}

pub fn create_email_service(config: &AppConfig) -> Arc<dyn EmailService> {
    if let Some(smtp) = &config.smtp {
        match SmtpEmailService::new(smtp, &config.base_url) {
            Ok(service) => {
                tracing::info!("Using SMTP email service");
                return Arc::new(service);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize SMTP email service: {}. Falling back to logging service",
                    e
                );
            }
        }
    } else {
        tracing::info!(
            "SMTP not configured. Using logging email service (emails will be logged to console)"
        );
    }

    Arc::new(LogEmailService::new(config.base_url.clone()))
}
