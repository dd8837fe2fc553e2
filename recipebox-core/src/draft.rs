//! Wire-level recipe input and its required-field check.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{EntityRef, Ingredient, Recipe};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// A recipe as submitted by a client. Every field may be absent on the wire.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: Option<String>,
    /// Cuisine name, resolved against the cuisine collection.
    pub cuisine: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub instructions: Option<Vec<String>>,
    /// Tag names, resolved against the tag collection.
    pub tags: Option<Vec<String>>,
}

/// A draft with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeInput {
    pub name: String,
    pub cuisine: String,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
}

impl RecipeDraft {
    pub fn validate(self) -> Result<RecipeInput, ValidationError> {
        let name = self.name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let cuisine = self
            .cuisine
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        match (name, cuisine, self.ingredients, self.instructions, self.tags) {
            (Some(name), Some(cuisine), Some(ingredients), Some(instructions), Some(tags)) => {
                Ok(RecipeInput {
                    name,
                    cuisine,
                    prep_time: self.prep_time,
                    cook_time: self.cook_time,
                    servings: self.servings,
                    ingredients,
                    instructions,
                    tags,
                })
            }
            (name, cuisine, ingredients, instructions, tags) => {
                let missing = [
                    ("name", name.is_none()),
                    ("cuisine", cuisine.is_none()),
                    ("ingredients", ingredients.is_none()),
                    ("instructions", instructions.is_none()),
                    ("tags", tags.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(ValidationError::MissingFields(missing))
            }
        }
    }
}

impl RecipeInput {
    /// Tag names in submission order with repeats removed.
    pub fn distinct_tags(&self) -> Vec<String> {
        let mut seen = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let tag = tag.trim();
            if !seen.iter().any(|s: &String| s == tag) {
                seen.push(tag.to_string());
            }
        }
        seen
    }

    /// Builds the stored document from resolved snapshots.
    pub fn into_recipe(self, cuisine: EntityRef, tags: Vec<EntityRef>) -> Recipe {
        Recipe::new(self.name, cuisine)
            .with_prep_time(self.prep_time)
            .with_cook_time(self.cook_time)
            .with_servings(self.servings)
            .with_ingredients(self.ingredients)
            .with_instructions(self.instructions)
            .with_tags(tags)
    }
}
