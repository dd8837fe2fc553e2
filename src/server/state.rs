use std::sync::Arc;

use sqlx::SqlitePool;

use crate::ai::{AiAssistant, Generator};
use crate::auth::{AuthService, TokenIssuer};
use crate::db::{CatalogRepository, RecipeRepository, UserRepository};
use crate::recipes::RecipeService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub recipes: RecipeService,
    pub catalog: CatalogRepository,
    pub assistant: AiAssistant,
    pub auth: AuthService,
}

impl AppState {
    /// Wires every service onto one pool.
    pub fn new(pool: SqlitePool, tokens: TokenIssuer, generator: Arc<dyn Generator>) -> Self {
        let recipe_repo = RecipeRepository::new(pool.clone());
        let catalog = CatalogRepository::new(pool.clone());
        let users = UserRepository::new(pool);

        Self {
            recipes: RecipeService::new(recipe_repo.clone(), catalog.clone()),
            assistant: AiAssistant::new(generator, recipe_repo, catalog.clone()),
            catalog,
            auth: AuthService::new(users, tokens),
        }
    }

    pub fn tokens(&self) -> TokenIssuer {
        self.auth.tokens().clone()
    }
}
