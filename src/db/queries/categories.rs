use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub label: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Inserts the given categories, overwriting the label of rows whose id
/// already exists. Runs in a single transaction.
pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, type) VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET type = excluded.type
            "#,
        )
        .bind(category.id)
        .bind(category.label)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn categories_are_ordered_by_id() {
        let pool = test_pool().await;
        let categories = get_all_categories(&pool).await.unwrap();
        let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(categories[0].label, "Science");
    }

    #[tokio::test]
    async fn import_updates_existing_and_adds_new() {
        let pool = test_pool().await;
        import_categories(
            &pool,
            vec![
                Category {
                    id: 1,
                    label: "Natural Science".to_owned(),
                },
                Category {
                    id: 7,
                    label: "Music".to_owned(),
                },
            ],
        )
        .await
        .unwrap();

        let categories = get_all_categories(&pool).await.unwrap();
        assert_eq!(categories.len(), 7);
        assert_eq!(categories[0].label, "Natural Science");
        assert_eq!(categories[6].label, "Music");
    }
}
