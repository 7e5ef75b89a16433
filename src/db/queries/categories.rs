use serde::{Deserialize, Serialize};

use crate::db::{Store, StoreError};

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

impl Store {
    pub async fn all_categories(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
SELECT id, type
FROM categories
ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(categories)
    }

    pub async fn category_by_id(&self, id: i64) -> Result<Option<Category>, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
SELECT id, type FROM categories WHERE categories.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(category)
    }

    /// Categories are matched on their exact name.
    pub async fn category_by_type(&self, kind: &str) -> Result<Option<Category>, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
SELECT id, type FROM categories WHERE categories.type = ?1
            "#,
        )
        .bind(kind)
        .fetch_optional(self.pool())
        .await?;
        Ok(category)
    }

    pub async fn create_category(&self, kind: &str) -> Result<Category, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
INSERT INTO categories (type) VALUES (?1) RETURNING id, type
            "#,
        )
        .bind(kind)
        .fetch_one(self.pool())
        .await?;
        Ok(category)
    }

    /// Inserts or renames the given categories, keeping their ids.
    pub async fn import_categories(&self, categories: &[Category]) -> Result<(), StoreError> {
        let mut tx = self.pool().begin().await?;
        for category in categories {
            sqlx::query(
                r#"
INSERT INTO categories (id, type) VALUES (?1, ?2)
ON CONFLICT (id) DO UPDATE SET type = excluded.type
                "#,
            )
            .bind(category.id)
            .bind(&category.kind)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
