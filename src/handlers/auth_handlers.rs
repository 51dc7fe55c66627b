use crate::error::Result;
use crate::models::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
    ResetPasswordRequest, TokenResponse, User, UserResponse, VerifyEmailRequest,
};
use crate::AppState;
use axum::{extract::State, response::Json, Extension};
use serde_json::{json, Value};

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserResponse>> {
    let user = state.user_service.register(request).await?;
    Ok(Json(user.into()))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let token = state.auth_service.login(request).await?;
    Ok(Json(token))
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<Json<Value>> {
    state
        .user_service
        .verify_email(&request.email, &request.token)
        .await?;
    Ok(Json(json!({ "message": "Email verified successfully" })))
}

/// Answers identically whether or not the email is registered.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>> {
    state.user_service.forgot_password(&request.email).await?;
    Ok(Json(json!({
        "message": "If the email exists, a password reset link will be sent"
    })))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<Value>> {
    state
        .user_service
        .reset_password(&request.email, &request.token, &request.new_password)
        .await?;
    Ok(Json(json!({ "message": "Password reset successfully" })))
}

pub async fn me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(user.into())
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<Value>> {
    state
        .user_service
        .change_password(&user, &request.current_password, &request.new_password)
        .await?;
    Ok(Json(json!({ "message": "Password changed successfully" })))
}
