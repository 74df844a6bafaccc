use sqlx::PgPool;
use tracing::{info, warn};

use crate::{
    error::{is_unique_violation, ApiError},
    items::{dto::CreateItemRequest, dto::ItemResponse, repo},
};

/// Validate and persist a new item for the given owner.
pub async fn create_item(
    db: &PgPool,
    owner_id: i64,
    req: CreateItemRequest,
) -> Result<ItemResponse, ApiError> {
    let nome = req.nome.trim();
    if nome.is_empty() {
        return Err(ApiError::Validation("nome é obrigatório".into()));
    }

    let senha = req.senha.trim();
    if senha.is_empty() {
        return Err(ApiError::Validation("senha é obrigatória".into()));
    }

    if owner_id <= 0 {
        return Err(ApiError::Validation("usuário é obrigatório".into()));
    }

    let item = repo::insert(db, nome, senha, owner_id).await.map_err(|e| {
        if is_unique_violation(&e) {
            warn!(user_id = owner_id, nome, "duplicate item name");
            ApiError::Conflict("já existe um item com este nome".into())
        } else {
            e.into()
        }
    })?;

    info!(user_id = owner_id, item_id = item.id, "item created");
    Ok(item.into())
}

/// All items owned by the user, oldest first.
pub async fn list_items(db: &PgPool, owner_id: i64) -> Result<Vec<ItemResponse>, ApiError> {
    let items = repo::list_by_user(db, owner_id).await?;
    Ok(items.into_iter().map(ItemResponse::from).collect())
}

/// Remove an item owned by the caller. A missing item and someone else's
/// item both come back as forbidden, so existence never leaks across owners.
pub async fn delete_item(db: &PgPool, item_id: i64, owner_id: i64) -> Result<(), ApiError> {
    if item_id <= 0 {
        return Err(ApiError::Validation("ID do item inválido".into()));
    }
    if owner_id <= 0 {
        return Err(ApiError::Validation("usuário é obrigatório".into()));
    }

    let removed = repo::delete_scoped(db, item_id, owner_id).await?;
    if removed == 0 {
        warn!(user_id = owner_id, item_id, "delete refused");
        return Err(ApiError::Forbidden(
            "você não tem acesso a este item".into(),
        ));
    }

    info!(user_id = owner_id, item_id, "item deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    // Validation failures return before any query, so a lazy pool that
    // never connects is enough.

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let state = AppState::fake();
        let err = create_item(
            &state.db,
            1,
            CreateItemRequest {
                nome: "   ".into(),
                senha: "abc123".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "nome é obrigatório");
    }

    #[tokio::test]
    async fn create_rejects_blank_secret() {
        let state = AppState::fake();
        let err = create_item(
            &state.db,
            1,
            CreateItemRequest {
                nome: "Gmail".into(),
                senha: "".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "senha é obrigatória");
    }

    #[tokio::test]
    async fn create_rejects_missing_owner() {
        let state = AppState::fake();
        let err = create_item(
            &state.db,
            0,
            CreateItemRequest {
                nome: "Gmail".into(),
                senha: "abc123".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "usuário é obrigatório");
    }

    #[tokio::test]
    async fn delete_rejects_non_positive_id() {
        let state = AppState::fake();
        let err = delete_item(&state.db, 0, 1).await.unwrap_err();
        assert_eq!(err.to_string(), "ID do item inválido");
    }
}
