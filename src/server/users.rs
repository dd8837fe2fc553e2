use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Serialize;
use uuid::Uuid;

use super::error::ApiJson;
use super::state::AppState;
use crate::auth::{Claims, Credentials};
use crate::error::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    pub message: &'static str,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedResponse {
    pub message: &'static str,
    pub token_data: Claims,
}

/// POST /users
pub async fn register(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<(StatusCode, Json<UserCreated>)> {
    let user_id = state.auth.register(credentials).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserCreated {
            message: "User registered",
            user_id,
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<Json<LoginResponse>> {
    let access_token = state.auth.login(credentials).await?;
    Ok(Json(LoginResponse { access_token }))
}

/// GET /protected (auth required)
pub async fn protected(Extension(claims): Extension<Claims>) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "Access granted",
        token_data: claims,
    })
}
