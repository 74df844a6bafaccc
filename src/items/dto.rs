use serde::{Deserialize, Serialize};

use crate::items::repo::Item;

/// Request body for POST /api/item. The owner comes from the token, never
/// from the payload.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub nome: String,
    pub senha: String,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: i64,
    pub nome: String,
    pub senha: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            nome: item.nome,
            senha: item.senha,
            user_id: item.user_id,
        }
    }
}
