use chrono::{DateTime, Utc};
use recipebox_core::{fold_case, Filter, Recipe};
use serde::de::DeserializeOwned;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use super::filter_sql::push_predicate;

#[derive(Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: String,
    name: String,
    cuisine: String,
    prep_time: Option<i32>,
    cook_time: Option<i32>,
    servings: Option<i32>,
    ingredients: String,
    instructions: String,
    tags: String,
    created_at: String,
    updated_at: String,
}

impl RecipeRow {
    fn into_recipe(self) -> Result<Recipe, sqlx::Error> {
        Ok(Recipe {
            id: Uuid::parse_str(&self.id).map_err(decode_error)?,
            name: self.name,
            cuisine: from_json(&self.cuisine)?,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            ingredients: from_json(&self.ingredients)?,
            instructions: from_json(&self.instructions)?,
            tags: from_json(&self.tags)?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

impl RecipeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, recipe: &Recipe) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO recipes (id, name, name_folded, cuisine, prep_time, cook_time, servings, ingredients, ingredients_folded, instructions, tags, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(recipe.id.to_string())
        .bind(&recipe.name)
        .bind(fold_case(&recipe.name))
        .bind(to_json(&recipe.cuisine)?)
        .bind(recipe.prep_time)
        .bind(recipe.cook_time)
        .bind(recipe.servings)
        .bind(to_json(&recipe.ingredients)?)
        .bind(to_json(&folded_ingredient_names(recipe))?)
        .bind(to_json(&recipe.instructions)?)
        .bind(to_json(&recipe.tags)?)
        .bind(recipe.created_at.to_rfc3339())
        .bind(recipe.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Overwrites the stored document with the same id, keeping its
    /// `created_at`. Returns false when no document matched.
    pub async fn replace(&self, recipe: &Recipe) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE recipes
            SET name = ?, name_folded = ?, cuisine = ?, prep_time = ?, cook_time = ?, servings = ?,
                ingredients = ?, ingredients_folded = ?, instructions = ?, tags = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&recipe.name)
        .bind(fold_case(&recipe.name))
        .bind(to_json(&recipe.cuisine)?)
        .bind(recipe.prep_time)
        .bind(recipe.cook_time)
        .bind(recipe.servings)
        .bind(to_json(&recipe.ingredients)?)
        .bind(to_json(&folded_ingredient_names(recipe))?)
        .bind(to_json(&recipe.instructions)?)
        .bind(to_json(&recipe.tags)?)
        .bind(recipe.updated_at.to_rfc3339())
        .bind(recipe.id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes by id. Deleting an absent id is not an error.
    pub async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Recipe>, sqlx::Error> {
        let row: Option<RecipeRow> = sqlx::query_as("SELECT * FROM recipes WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(RecipeRow::into_recipe).transpose()
    }

    /// Returns every recipe accepted by `filter`, ordered by name.
    pub async fn find(&self, filter: &Filter) -> Result<Vec<Recipe>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM recipes WHERE ");
        push_predicate(&mut qb, filter);
        qb.push(" ORDER BY recipes.name, recipes.id");

        let rows: Vec<RecipeRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(RecipeRow::into_recipe).collect()
    }

    /// Distinct ingredient names across all recipes, sorted.
    pub async fn ingredient_names(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT DISTINCT json_extract(i.value, '$.name') AS name
            FROM recipes, json_each(recipes.ingredients) AS i
            WHERE json_extract(i.value, '$.name') IS NOT NULL
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

fn folded_ingredient_names(recipe: &Recipe) -> Vec<String> {
    recipe.ingredients.iter().map(|i| fold_case(&i.name)).collect()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, sqlx::Error> {
    serde_json::to_string(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

fn from_json<T: DeserializeOwned>(raw: &str) -> Result<T, sqlx::Error> {
    serde_json::from_str(raw).map_err(decode_error)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(decode_error)
}

fn decode_error<E>(e: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(e))
}
