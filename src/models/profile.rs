use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Perfil público do agente cultural (1:1 com users).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub areas: Vec<String>,
    pub social_links: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProfilePayload {
    pub bio: Option<String>,
    pub areas: Option<Vec<String>>,
    pub social_links: Option<Value>,
}

// Portal de apresentação do ente federado (1:1 com entities).
// Único recurso, junto com Evaluator, que admite exclusão física.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityPortal {
    pub id: Uuid,
    pub entity_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub theme: Value,
    pub links: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortalPayload {
    pub entity_id: Uuid,
    #[validate(length(min = 2, message = "O título deve ter no mínimo 2 caracteres."))]
    pub title: String,
    pub description: Option<String>,
    pub theme: Option<Value>,
    pub links: Option<Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortalPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub theme: Option<Value>,
    pub links: Option<Value>,
}
