use recipebox_core::{ExtractedCriteria, Recipe, RecipeDraft};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::generator::{Generator, GeneratorError, Prompt};
use crate::db::{CatalogRepository, RecipeRepository};
use crate::error::{Error, Result};

/// Names the generator is allowed to draw from.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Vocabulary {
    pub cuisines: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct AiAssistant {
    generator: Arc<dyn Generator>,
    recipes: RecipeRepository,
    catalog: CatalogRepository,
}

impl AiAssistant {
    pub fn new(
        generator: Arc<dyn Generator>,
        recipes: RecipeRepository,
        catalog: CatalogRepository,
    ) -> Self {
        Self {
            generator,
            recipes,
            catalog,
        }
    }

    /// Lets the generator turn free text into search criteria, then runs them.
    ///
    /// Extracted values are matched exactly and are not checked against the
    /// vocabulary; a value the store does not know simply matches nothing.
    pub async fn search(&self, query: &str) -> Result<Vec<Recipe>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::validation("Missing query"));
        }

        let vocabulary = Vocabulary {
            cuisines: self.catalog.cuisine_names().await?,
            tags: self.catalog.tag_names().await?,
            ingredients: Some(self.recipes.ingredient_names().await?),
        };

        let raw = self.generator.generate(&search_prompt(&vocabulary, query)).await?;
        let extracted: ExtractedCriteria = parse_json(&raw)?;
        tracing::debug!(?extracted, "criteria extracted from query");

        let recipes = self.recipes.find(&extracted.criteria()).await?;
        Ok(recipes)
    }

    /// Lets the generator write a recipe from free text and stores it.
    ///
    /// The reply must carry every field a client write needs; an incomplete
    /// reply is a backend fault. The proposed cuisine must exist, otherwise
    /// nothing is written. Proposed tags that do not exist are dropped.
    pub async fn create_from_text(&self, text: &str) -> Result<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::validation("Missing text"));
        }

        let vocabulary = Vocabulary {
            cuisines: self.catalog.cuisine_names().await?,
            tags: self.catalog.tag_names().await?,
            ingredients: None,
        };

        let raw = self.generator.generate(&recipe_prompt(&vocabulary, text)).await?;
        let draft: RecipeDraft = parse_json(&raw)?;
        let input = draft.validate().map_err(|e| {
            tracing::warn!(error = %e, "generator returned an incomplete recipe");
            GeneratorError::Malformed(e.to_string())
        })?;

        let cuisine = self
            .catalog
            .find_cuisine(&input.cuisine)
            .await?
            .ok_or_else(|| {
                tracing::warn!(cuisine = %input.cuisine, "generator proposed an unknown cuisine");
                Error::not_found("Generated recipe references an unknown cuisine")
            })?;

        let wanted: Vec<String> = input
            .distinct_tags()
            .into_iter()
            .filter(|t| !t.is_empty())
            .collect();
        let tags = self.catalog.find_tags(&wanted).await?;
        if tags.len() != wanted.len() {
            let dropped: Vec<&str> = wanted
                .iter()
                .filter(|w| !tags.iter().any(|t| t.name == **w))
                .map(String::as_str)
                .collect();
            tracing::warn!(?dropped, "dropping unknown tags from generated recipe");
        }

        let recipe = input.into_recipe(
            cuisine.snapshot(),
            tags.iter().map(|t| t.snapshot()).collect(),
        );

        self.recipes.insert(&recipe).await?;
        tracing::info!(recipe_id = %recipe.id, "stored generated recipe");
        Ok(recipe.id)
    }
}

fn search_prompt(vocabulary: &Vocabulary, query: &str) -> Prompt {
    Prompt {
        system: format!(
            "You turn a recipe search request into search criteria. \
             Answer with a single JSON object with the optional keys \
             \"cuisines\", \"tags\" and \"ingredients\", each an array of strings. \
             Only use values that appear in this vocabulary, spelled exactly as given, \
             and leave out keys the request does not mention.\n\
             Vocabulary: {}",
            to_prompt_json(vocabulary)
        ),
        user: query.to_string(),
    }
}

fn recipe_prompt(vocabulary: &Vocabulary, text: &str) -> Prompt {
    Prompt {
        system: format!(
            "You write a structured recipe from the user's description. \
             Answer with a single JSON object with the keys \
             \"name\" (string), \"cuisine\" (string), \"prepTime\", \"cookTime\" \
             and \"servings\" (integers or null), \"ingredients\" (array of objects \
             with \"name\" string, \"quantity\" number and \"unit\" string), \
             \"instructions\" (array of strings) and \"tags\" (array of strings). \
             The cuisine must be one of the listed cuisines and every tag one of the \
             listed tags, spelled exactly as given.\n\
             Vocabulary: {}",
            to_prompt_json(vocabulary)
        ),
        user: text.to_string(),
    }
}

fn to_prompt_json(vocabulary: &Vocabulary) -> String {
    serde_json::to_string(vocabulary).unwrap_or_else(|_| "{}".to_string())
}

/// Parses the generator's JSON answer, tolerating a surrounding code fence.
fn parse_json<T: DeserializeOwned>(raw: &str) -> std::result::Result<T, GeneratorError> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim()).map_err(|e| GeneratorError::Malformed(e.to_string()))
}
