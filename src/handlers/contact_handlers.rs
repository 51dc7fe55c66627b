use crate::error::{ApiError, Result};
use crate::AppState;
use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.len() > 3
}

/// Contact intake. Delivery is fire-and-forget; with no SMTP configured the
/// message only lands in the log.
pub async fn submit_contact_form(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<Value>> {
    if !is_valid_email(&form.email) {
        return Err(ApiError::validation("Invalid email address"));
    }
    if form.message.trim().is_empty() {
        return Err(ApiError::validation("Message is required"));
    }

    let email_service = state.email_service.clone();
    tokio::spawn(async move {
        if let Err(e) = email_service
            .send_contact_message(&form.name, &form.email, &form.subject, &form.message)
            .await
        {
            tracing::error!("Failed to forward contact message from {}: {e}", form.email);
        }
    });

    Ok(Json(json!({
        "status": "success",
        "message": "Thank you for your message"
    })))
}
