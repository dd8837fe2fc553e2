use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use recipebox_core::{Cuisine, Recipe, RecipeDraft, SearchParams, Tag};
use serde::Serialize;
use uuid::Uuid;

use super::error::{ApiJson, ApiQuery};
use super::state::AppState;
use super::MessageResponse;
use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct RecipeList {
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreated {
    pub message: &'static str,
    pub recipe_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CuisineList {
    pub cuisines: Vec<Cuisine>,
}

#[derive(Debug, Serialize)]
pub struct TagList {
    pub tags: Vec<Tag>,
}

/// GET /recipes
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<RecipeList>> {
    let recipes = state.recipes.search(&params).await?;
    Ok(Json(RecipeList { recipes }))
}

/// GET /recipes/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Recipe>> {
    Ok(Json(state.recipes.get(&id).await?))
}

/// POST /recipes
pub async fn create(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<RecipeDraft>,
) -> Result<(StatusCode, Json<RecipeCreated>)> {
    let recipe_id = state.recipes.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeCreated {
            message: "Recipe created",
            recipe_id,
        }),
    ))
}

/// PUT /recipes/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<RecipeDraft>,
) -> Result<Json<MessageResponse>> {
    state.recipes.update(&id, draft).await?;
    Ok(Json(MessageResponse::new("Recipe updated")))
}

/// DELETE /recipes/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.recipes.delete(&id).await?;
    Ok(Json(MessageResponse::new("Recipe deleted")))
}

/// GET /cuisines
pub async fn cuisines(State(state): State<AppState>) -> Result<Json<CuisineList>> {
    let cuisines = state.catalog.list_cuisines().await?;
    Ok(Json(CuisineList { cuisines }))
}

/// GET /tags
pub async fn tags(State(state): State<AppState>) -> Result<Json<TagList>> {
    let tags = state.catalog.list_tags().await?;
    Ok(Json(TagList { tags }))
}
