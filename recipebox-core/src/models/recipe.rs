use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::EntityRef;
use super::ingredient::Ingredient;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub cuisine: EntityRef,
    pub prep_time: Option<i32>, // minutes
    pub cook_time: Option<i32>, // minutes
    pub servings: Option<i32>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub tags: Vec<EntityRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, cuisine: EntityRef) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            cuisine,
            prep_time: None,
            cook_time: None,
            servings: None,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_instructions(mut self, instructions: Vec<String>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn with_prep_time(mut self, minutes: Option<i32>) -> Self {
        self.prep_time = minutes;
        self
    }

    pub fn with_cook_time(mut self, minutes: Option<i32>) -> Self {
        self.cook_time = minutes;
        self
    }

    pub fn with_servings(mut self, servings: Option<i32>) -> Self {
        self.servings = servings;
        self
    }

    pub fn with_tags(mut self, tags: Vec<EntityRef>) -> Self {
        self.tags = tags;
        self
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }
}
