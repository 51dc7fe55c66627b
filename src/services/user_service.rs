use crate::error::{ApiError, Result};
use crate::models::{RegisterRequest, User};
use crate::repositories::user_repository::{NewUser, RepositoryError, UserRepository};
use crate::services::email_service::EmailService;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use chrono::{Duration, Utc};
use rand::Rng;
use std::sync::Arc;

/// Registration, email verification and password lifecycle. Outbound
/// notifications are dispatched fire-and-forget: the triggering request never
/// waits for, or learns about, delivery.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    email_service: Arc<dyn EmailService>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, email_service: Arc<dyn EmailService>) -> Self {
        Self {
            repository,
            email_service,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        self.validate_email(&request.email)?;
        if request.username.trim().is_empty() {
            return Err(ApiError::validation("Username is required"));
        }
        self.validate_password(&request.password)?;

        if self
            .repository
            .find_by_email(&request.email)
            .await
            .map_err(ApiError::from)?
            .is_some()
        {
            return Err(ApiError::Conflict(
                "The user with this email already exists in the system.".to_string(),
            ));
        }

        let password_hash = self.hash_password(&request.password)?;
        let verification_token = generate_token();

        let new_user = NewUser {
            email: request.email,
            username: request.username,
            password_hash,
            full_name: request.full_name,
            verification_token: verification_token.clone(),
        };

        let user = match self.repository.create_user(new_user).await {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists) => {
                return Err(ApiError::Conflict(
                    "The user with this email already exists in the system.".to_string(),
                ))
            }
            Err(e) => return Err(e.into()),
        };

        self.dispatch_verification_email(user.email.clone(), verification_token);

        Ok(user)
    }

    pub async fn verify_email(&self, email: &str, token: &str) -> Result<()> {
        let user = self
            .repository
            .find_by_verification_token(email, token)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found("Invalid verification token"))?;

        self.repository
            .mark_email_verified(user.id)
            .await
            .map_err(ApiError::from)?;

        Ok(())
    }

    /// Never reveals whether the email exists; the handler answers with the
    /// same acknowledgment either way.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        let user = match self
            .repository
            .find_by_email(email)
            .await
            .map_err(ApiError::from)?
        {
            Some(user) => user,
            None => return Ok(()),
        };

        let reset_token = generate_token();
        let expires = Utc::now().naive_utc() + Duration::hours(24);

        self.repository
            .set_reset_token(user.id, &reset_token, expires)
            .await
            .map_err(ApiError::from)?;

        self.dispatch_reset_email(user.email, reset_token);

        Ok(())
    }

    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> Result<()> {
        self.validate_password(new_password)?;

        let user = self
            .repository
            .find_by_reset_token(email, token)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::validation("Invalid or expired reset token"))?;

        let expired = match user.reset_token_expires {
            Some(expires) => expires < Utc::now().naive_utc(),
            None => true,
        };
        if expired {
            return Err(ApiError::validation("Invalid or expired reset token"));
        }

        let password_hash = self.hash_password(new_password)?;
        self.repository
            .reset_password(user.id, &password_hash)
            .await
            .map_err(ApiError::from)?;

        Ok(())
    }

    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        if !verify_password(current_password, &user.password_hash) {
            return Err(ApiError::validation("Incorrect password"));
        }
        self.validate_password(new_password)?;

        let password_hash = self.hash_password(new_password)?;
        self.repository
            .update_password(user.id, &password_hash)
            .await
            .map_err(ApiError::from)?;

        Ok(())
    }

    fn dispatch_verification_email(&self, email: String, token: String) {
        let email_service = self.email_service.clone();
        tokio::spawn(async move {
            if let Err(e) = email_service.send_verification_email(&email, &token).await {
                tracing::error!("Failed to send verification email to {email}: {e}");
            }
        });
    }

    fn dispatch_reset_email(&self, email: String, token: String) {
        let email_service = self.email_service.clone();
        tokio::spawn(async move {
            if let Err(e) = email_service
                .send_password_reset_email(&email, &token)
                .await
            {
                tracing::error!("Failed to send password reset email to {email}: {e}");
            }
        });
    }

    fn validate_email(&self, email: &str) -> Result<()> {
        if !email.contains('@') || email.len() > 255 || email.is_empty() {
            return Err(ApiError::validation("Invalid email address"));
        }
        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<()> {
        if password.len() < 8 {
            return Err(ApiError::validation(
                "Password too weak (minimum 8 characters)",
            ));
        }
        Ok(())
    }

    fn hash_password(&self, password: &str) -> Result<String> {
        hash_password(password)
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("Password hashing failed: {e}");
            ApiError::Internal
        })
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    if let Ok(parsed_hash) = PasswordHash::new(password_hash) {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    } else {
        false
    }
}

fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    hex::encode(bytes)
}
