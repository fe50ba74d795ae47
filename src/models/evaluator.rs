use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::UserRole;

// Parecerista: capacidade de avaliação vinculada a um usuário existente e a
// um ente federado. Criar promove o usuário a `evaluator`; excluir rebaixa
// para `agent`. Admins mantêm o papel nas duas direções.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evaluator {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entity_id: Uuid,
    pub specialties: Vec<String>,
    pub biography: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvaluatorPayload {
    /// Usuário já cadastrado que passará a atuar como parecerista
    pub user_id: Uuid,
    /// Quando omitido, usa o ente do admin que está criando
    pub entity_id: Option<Uuid>,
    pub specialties: Option<Vec<String>>,
    pub biography: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
}

// Patch explícito. `entity_id` e `is_active` só têm efeito para admins; para
// os demais chamadores esses campos são descartados antes da escrita.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvaluatorPayload {
    pub specialties: Option<Vec<String>>,
    pub biography: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub entity_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

impl UpdateEvaluatorPayload {
    /// Remove os campos que não-admins não podem alterar.
    pub fn stripped_for_non_admin(mut self) -> Self {
        self.entity_id = None;
        self.is_active = None;
        self
    }
}

/// Papel do usuário após o credenciamento como parecerista. `None` quando o
/// papel atual deve ser mantido (admins nunca são rebaixados).
pub fn role_after_credential_grant(current: UserRole) -> Option<UserRole> {
    (current != UserRole::Admin).then_some(UserRole::Evaluator)
}

/// Papel do usuário após a revogação do credenciamento.
pub fn role_after_credential_revoke(current: UserRole) -> Option<UserRole> {
    (current != UserRole::Admin).then_some(UserRole::Agent)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorFilter {
    pub entity_id: Option<Uuid>,
    pub specialty: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_admin_patch_loses_privileged_fields() {
        let patch = UpdateEvaluatorPayload {
            specialties: Some(vec!["música".into()]),
            biography: Some("bio".into()),
            education: None,
            experience: None,
            entity_id: Some(Uuid::new_v4()),
            is_active: Some(false),
        };

        let stripped = patch.stripped_for_non_admin();
        assert!(stripped.entity_id.is_none());
        assert!(stripped.is_active.is_none());
        assert_eq!(stripped.specialties.as_deref(), Some(&["música".to_string()][..]));
    }

    #[test]
    fn credential_grant_promotes_everyone_except_admins() {
        assert_eq!(role_after_credential_grant(UserRole::Agent), Some(UserRole::Evaluator));
        assert_eq!(role_after_credential_grant(UserRole::Evaluator), Some(UserRole::Evaluator));
        assert_eq!(role_after_credential_grant(UserRole::Admin), None);
    }

    #[test]
    fn credential_revoke_demotes_everyone_except_admins() {
        assert_eq!(role_after_credential_revoke(UserRole::Evaluator), Some(UserRole::Agent));
        assert_eq!(role_after_credential_revoke(UserRole::Admin), None);
    }
}
