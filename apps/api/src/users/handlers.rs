//! Axum route handlers for the User API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::users::store;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// POST /api/v1/users/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserRow>, AppError> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }
    if request.password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    if store::find_by_email(&state.db, email).await?.is_some() {
        return Err(AppError::Validation(format!(
            "A user with email {email} already exists"
        )));
    }

    let password_hash = store::hash_password(&request.password);
    let user = store::insert_user(
        &state.db,
        email,
        &password_hash,
        request.first_name.trim(),
        request.last_name.trim(),
    )
    .await?;

    info!("Registered user {}", user.id);
    Ok(Json(user))
}

/// GET /api/v1/users/:user_id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserRow>, AppError> {
    store::find_by_id(&state.db, user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

/// GET /api/v1/users/:user_id/validate
///
/// Existence check used by other subsystems before attributing data to a
/// user id. Always 200 with a boolean body.
pub async fn handle_validate_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<bool>, AppError> {
    let exists = store::exists(&state.db, user_id).await?;
    Ok(Json(exists))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserializes() {
        let json = serde_json::json!({
            "email": "runner@example.com",
            "password": "secret1",
            "first_name": "Jordan",
            "last_name": "Lee"
        });
        let request: RegisterRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.email, "runner@example.com");
    }
}
