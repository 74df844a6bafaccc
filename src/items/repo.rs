use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Stored password entry, owned by one user.
#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: i64,
    pub nome: String,
    pub senha: String,
    pub user_id: i64,
    pub created_at: OffsetDateTime,
}

/// Insert a new item. The (user_id, nome) unique constraint surfaces
/// duplicates as a database error the caller maps to a conflict.
pub async fn insert(
    db: &PgPool,
    nome: &str,
    senha: &str,
    user_id: i64,
) -> Result<Item, sqlx::Error> {
    sqlx::query_as::<_, Item>(
        r#"
        INSERT INTO items (nome, senha, user_id)
        VALUES ($1, $2, $3)
        RETURNING id, nome, senha, user_id, created_at
        "#,
    )
    .bind(nome)
    .bind(senha)
    .bind(user_id)
    .fetch_one(db)
    .await
}

pub async fn list_by_user(db: &PgPool, user_id: i64) -> Result<Vec<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(
        r#"
        SELECT id, nome, senha, user_id, created_at
        FROM items
        WHERE user_id = $1
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Delete an item only if the caller owns it. Returns the number of rows
/// removed; zero means not found or not owned, indistinguishable on purpose.
pub async fn delete_scoped(db: &PgPool, id: i64, user_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM items
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}
