use recipebox_core::{Cuisine, Tag};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

/// Cuisine and tag vocabularies.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct NamedRow {
    id: String,
    name: String,
}

impl NamedRow {
    fn id(&self) -> Result<Uuid, sqlx::Error> {
        Uuid::parse_str(&self.id).map_err(|e| sqlx::Error::Decode(Box::new(e)))
    }
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_cuisine(&self, cuisine: &Cuisine) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO cuisines (id, name) VALUES (?, ?)")
            .bind(cuisine.id.to_string())
            .bind(&cuisine.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn create_tag(&self, tag: &Tag) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO tags (id, name) VALUES (?, ?)")
            .bind(tag.id.to_string())
            .bind(&tag.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Exact, case-sensitive lookup.
    pub async fn find_cuisine(&self, name: &str) -> Result<Option<Cuisine>, sqlx::Error> {
        let row: Option<NamedRow> = sqlx::query_as("SELECT id, name FROM cuisines WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| Ok(Cuisine { id: r.id()?, name: r.name }))
            .transpose()
    }

    /// Returns the tags whose names appear in `names`, in the order given.
    /// Names with no matching tag are simply absent from the result.
    pub async fn find_tags(&self, names: &[String]) -> Result<Vec<Tag>, sqlx::Error> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT id, name FROM tags WHERE name IN (");
        let mut list = qb.separated(", ");
        for name in names {
            list.push_bind(name.clone());
        }
        list.push_unseparated(")");

        let rows: Vec<NamedRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        let mut tags = Vec::with_capacity(rows.len());
        for row in rows {
            tags.push(Tag {
                id: row.id()?,
                name: row.name,
            });
        }
        tags.sort_by_key(|t| names.iter().position(|n| *n == t.name));
        Ok(tags)
    }

    pub async fn list_cuisines(&self) -> Result<Vec<Cuisine>, sqlx::Error> {
        let rows: Vec<NamedRow> = sqlx::query_as("SELECT id, name FROM cuisines ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|r| Ok(Cuisine { id: r.id()?, name: r.name }))
            .collect()
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, sqlx::Error> {
        let rows: Vec<NamedRow> = sqlx::query_as("SELECT id, name FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|r| Ok(Tag { id: r.id()?, name: r.name }))
            .collect()
    }

    pub async fn cuisine_names(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM cuisines ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn tag_names(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }

    /// Removes a cuisine. Recipes keep their embedded snapshot.
    pub async fn delete_cuisine(&self, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cuisines WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Removes a tag. Recipes keep their embedded snapshot.
    pub async fn delete_tag(&self, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
