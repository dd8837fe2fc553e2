use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{ApiJson, ApiQuery};
use super::recipes::RecipeList;
use super::state::AppState;
use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct AiSearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct AiRecipeRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecipeCreated {
    pub recipe_id: Uuid,
}

/// GET /ai/recipes?q=
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AiSearchQuery>,
) -> Result<Json<RecipeList>> {
    let recipes = state.assistant.search(&query.q).await?;
    Ok(Json(RecipeList { recipes }))
}

/// POST /ai/recipes
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AiRecipeRequest>,
) -> Result<(StatusCode, Json<AiRecipeCreated>)> {
    let recipe_id = state.assistant.create_from_text(&request.text).await?;
    Ok((StatusCode::CREATED, Json(AiRecipeCreated { recipe_id })))
}
