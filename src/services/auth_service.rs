use crate::auth::TokenManager;
use crate::error::{ApiError, Result};
use crate::models::{LoginRequest, TokenResponse, User};
use crate::repositories::user_repository::UserRepository;
use crate::services::user_service::verify_password;
use std::sync::Arc;

/// Login and bearer-token resolution.
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    token_manager: TokenManager,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>, token_manager: TokenManager) -> Self {
        Self {
            user_repository,
            token_manager,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse> {
        let user = self
            .user_repository
            .find_by_email(&request.email)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("Incorrect email or password"))?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(ApiError::unauthorized("Incorrect email or password"));
        }

        if !user.is_active {
            return Err(ApiError::unauthorized(
                "Please verify your email before logging in",
            ));
        }

        self.user_repository
            .record_login(user.id)
            .await
            .map_err(ApiError::from)?;

        let access_token = self.token_manager.issue(user.id).map_err(|e| {
            tracing::error!("Token issuance failed: {e}");
            ApiError::Internal
        })?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Resolves a bearer token to its user. Used by the auth middleware on
    /// every protected request.
    pub async fn authenticate_token(&self, token: &str) -> Result<User> {
        let claims = self
            .token_manager
            .verify(token)
            .map_err(|_| ApiError::unauthorized("Could not validate credentials"))?;

        let user = self
            .user_repository
            .find_by_id(claims.sub)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("Could not validate credentials"))?;

        if !user.is_active {
            return Err(ApiError::unauthorized("Inactive user"));
        }

        Ok(user)
    }
}
