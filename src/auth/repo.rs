use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub data_nascimento: Date,
    pub email: String,
    pub senha_hash: String,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by (already normalized) email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, nome, data_nascimento, email, senha_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user. The unique constraint on email surfaces duplicates
    /// as a database error the caller maps to a conflict.
    pub async fn create(
        db: &PgPool,
        nome: &str,
        data_nascimento: Date,
        email: &str,
        senha_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (nome, data_nascimento, email, senha_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nome, data_nascimento, email, senha_hash, created_at
            "#,
        )
        .bind(nome)
        .bind(data_nascimento)
        .bind(email)
        .bind(senha_hash)
        .fetch_one(db)
        .await
    }
}
