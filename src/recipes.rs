//! Recipe reads and the validated write path.
//!
//! Writes resolve the cuisine and tag names against the catalog first and
//! embed the resolved snapshots. Resolution and the write are separate
//! statements; a reference deleted in between is not detected.

use chrono::Utc;
use recipebox_core::{Recipe, RecipeDraft, RecipeInput, SearchParams};
use uuid::Uuid;

use crate::db::{CatalogRepository, RecipeRepository};
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct RecipeService {
    recipes: RecipeRepository,
    catalog: CatalogRepository,
}

impl RecipeService {
    pub fn new(recipes: RecipeRepository, catalog: CatalogRepository) -> Self {
        Self { recipes, catalog }
    }

    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Recipe>> {
        let filter = params.criteria();
        tracing::debug!(?filter, "searching recipes");
        Ok(self.recipes.find(&filter).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Recipe> {
        let not_found = || Error::not_found("Recipe not found");
        let id = Uuid::parse_str(id).map_err(|_| not_found())?;
        self.recipes.get_by_id(id).await?.ok_or_else(not_found)
    }

    pub async fn create(&self, draft: RecipeDraft) -> Result<Uuid> {
        let recipe = self.resolve(draft.validate()?).await?;
        self.recipes.insert(&recipe).await?;
        tracing::info!(recipe_id = %recipe.id, "created recipe");
        Ok(recipe.id)
    }

    /// Replaces the recipe stored under `id`.
    pub async fn update(&self, id: &str, draft: RecipeDraft) -> Result<()> {
        let input = draft.validate()?;
        let id = Uuid::parse_str(id).map_err(|_| Error::not_found("Recipe not found"))?;

        let mut recipe = self.resolve(input).await?;
        recipe.id = id;
        recipe.updated_at = Utc::now();

        if !self.recipes.replace(&recipe).await? {
            return Err(Error::not_found("Recipe not found"));
        }
        tracing::info!(recipe_id = %id, "updated recipe");
        Ok(())
    }

    /// Deletes the recipe if it exists. Absent ids succeed too.
    pub async fn delete(&self, id: &str) -> Result<()> {
        match Uuid::parse_str(id) {
            Ok(id) => {
                self.recipes.delete(id).await?;
                tracing::info!(recipe_id = %id, "deleted recipe");
            }
            Err(_) => tracing::debug!(id, "delete of unparseable id is a no-op"),
        }
        Ok(())
    }

    /// Looks up the referenced cuisine and tags, all of which must exist.
    async fn resolve(&self, input: RecipeInput) -> Result<Recipe> {
        let cuisine = self
            .catalog
            .find_cuisine(&input.cuisine)
            .await?
            .ok_or_else(|| Error::validation("Invalid cuisine"))?;

        let wanted = input.distinct_tags();
        let tags = self.catalog.find_tags(&wanted).await?;
        if tags.len() != wanted.len() {
            return Err(Error::validation("Invalid tag"));
        }

        let tags = tags.iter().map(|t| t.snapshot()).collect();
        Ok(input.into_recipe(cuisine.snapshot(), tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use recipebox_core::{Cuisine, Filter, Ingredient, Tag};
    use tempfile::TempDir;

    struct TestContext {
        service: RecipeService,
        recipes: RecipeRepository,
        catalog: CatalogRepository,
        _temp_dir: TempDir,
    }

    async fn setup() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&temp_dir.path().join("test.db")).await.unwrap();
        let recipes = RecipeRepository::new(pool.clone());
        let catalog = CatalogRepository::new(pool);

        catalog.create_cuisine(&Cuisine::new("Italian")).await.unwrap();
        for tag in ["quick", "vegan", "popular"] {
            catalog.create_tag(&Tag::new(tag)).await.unwrap();
        }

        TestContext {
            service: RecipeService::new(recipes.clone(), catalog.clone()),
            recipes,
            catalog,
            _temp_dir: temp_dir,
        }
    }

    fn draft(cuisine: &str, tags: &[&str]) -> RecipeDraft {
        RecipeDraft {
            name: Some("Pasta".into()),
            cuisine: Some(cuisine.into()),
            prep_time: Some(5),
            cook_time: Some(10),
            servings: Some(2),
            ingredients: Some(vec![Ingredient::new("spaghetti", 200.0, "g")]),
            instructions: Some(vec!["Boil.".into()]),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        }
    }

    async fn count(ctx: &TestContext) -> usize {
        ctx.recipes.find(&Filter::All).await.unwrap().len()
    }

    #[tokio::test]
    async fn test_create_embeds_resolved_snapshots() {
        let ctx = setup().await;
        let id = ctx.service.create(draft("Italian", &["vegan", "quick"])).await.unwrap();

        let recipe = ctx.service.get(&id.to_string()).await.unwrap();
        let italian = ctx.catalog.find_cuisine("Italian").await.unwrap().unwrap();
        assert_eq!(recipe.cuisine, italian.snapshot());
        let tags: Vec<&str> = recipe.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tags, vec!["vegan", "quick"]);
    }

    #[tokio::test]
    async fn test_unknown_cuisine_writes_nothing() {
        let ctx = setup().await;
        let err = ctx.service.create(draft("French", &["quick"])).await.unwrap_err();

        assert!(matches!(err, Error::Validation(ref m) if m == "Invalid cuisine"));
        assert_eq!(count(&ctx).await, 0);
    }

    #[tokio::test]
    async fn test_any_unknown_tag_writes_nothing() {
        let ctx = setup().await;
        let err = ctx
            .service
            .create(draft("Italian", &["quick", "nonexistent"]))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(ref m) if m == "Invalid tag"));
        assert_eq!(count(&ctx).await, 0);
    }

    #[tokio::test]
    async fn test_repeated_tag_names_resolve_once() {
        let ctx = setup().await;
        let id = ctx.service.create(draft("Italian", &["quick", "quick"])).await.unwrap();

        let recipe = ctx.service.get(&id.to_string()).await.unwrap();
        assert_eq!(recipe.tags.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_fields_write_nothing() {
        let ctx = setup().await;
        let incomplete = RecipeDraft {
            instructions: None,
            ..draft("Italian", &[])
        };

        let err = ctx.service.create(incomplete).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(count(&ctx).await, 0);
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let ctx = setup().await;
        let id = ctx.service.create(draft("Italian", &["quick"])).await.unwrap();
        let before = ctx.service.get(&id.to_string()).await.unwrap();

        let changed = RecipeDraft {
            name: Some("Better Pasta".into()),
            ..draft("Italian", &["popular"])
        };
        ctx.service.update(&id.to_string(), changed).await.unwrap();

        let after = ctx.service.get(&id.to_string()).await.unwrap();
        assert_eq!(after.name, "Better Pasta");
        assert!(after.has_tag("popular"));
        assert!(!after.has_tag("quick"));
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_recipe_is_not_found() {
        let ctx = setup().await;

        let err = ctx
            .service
            .update(&Uuid::new_v4().to_string(), draft("Italian", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let err = ctx.service.update("not-a-uuid", draft("Italian", &[])).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(count(&ctx).await, 0);
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let ctx = setup().await;
        let id = ctx.service.create(draft("Italian", &[])).await.unwrap();

        let err = ctx
            .service
            .update(&id.to_string(), draft("French", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(ctx.service.get(&id.to_string()).await.unwrap().cuisine.name, "Italian");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let ctx = setup().await;
        let id = ctx.service.create(draft("Italian", &[])).await.unwrap();

        ctx.service.delete(&id.to_string()).await.unwrap();
        ctx.service.delete(&id.to_string()).await.unwrap();
        ctx.service.delete("not-a-uuid").await.unwrap();
        assert!(matches!(
            ctx.service.get(&id.to_string()).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_snapshot_survives_catalog_changes() {
        let ctx = setup().await;
        let id = ctx.service.create(draft("Italian", &["quick"])).await.unwrap();

        ctx.catalog.delete_tag("quick").await.unwrap();
        ctx.catalog.delete_cuisine("Italian").await.unwrap();

        let recipe = ctx.service.get(&id.to_string()).await.unwrap();
        assert_eq!(recipe.cuisine.name, "Italian");
        assert!(recipe.has_tag("quick"));
    }

    #[tokio::test]
    async fn test_search_uses_criteria() {
        let ctx = setup().await;
        ctx.service.create(draft("Italian", &["quick"])).await.unwrap();
        ctx.service.create(draft("Italian", &["vegan"])).await.unwrap();

        let params = SearchParams {
            tags: Some("vegan".into()),
            ..Default::default()
        };
        let found = ctx.service.search(&params).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].has_tag("vegan"));
    }
}
