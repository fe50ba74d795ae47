use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "group_member_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GroupMemberRole {
    Admin,
    Member,
}

// Coletivo cultural com membros admin/member.
// Invariante: sempre existe ao menos um admin.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CulturalGroup {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub documents: Value,
    pub created_by: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: GroupMemberRole,
    pub joined_at: DateTime<Utc>,
}

// Coletivo junto com a lista de membros, como o frontend consome.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: CulturalGroup,
    pub members: Vec<GroupMember>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupPayload {
    #[validate(length(min = 2, message = "O nome do coletivo deve ter no mínimo 2 caracteres."))]
    pub name: String,
    pub description: Option<String>,
    pub documents: Option<Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub documents: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberPayload {
    pub user_id: Uuid,
    pub role: Option<GroupMemberRole>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeMemberRolePayload {
    pub role: GroupMemberRole,
}

/// Guarda do último admin: remover ou rebaixar o único admin deixaria o
/// coletivo sem administração.
pub fn ensure_not_last_admin(
    members: &[GroupMember],
    target_user_id: Uuid,
) -> Result<(), crate::common::error::AppError> {
    let target_is_admin = members
        .iter()
        .any(|m| m.user_id == target_user_id && m.role == GroupMemberRole::Admin);
    if !target_is_admin {
        return Ok(());
    }

    let admin_count = members
        .iter()
        .filter(|m| m.role == GroupMemberRole::Admin)
        .count();
    if admin_count <= 1 {
        return Err(crate::common::error::AppError::BadRequest(
            "O último administrador do coletivo não pode ser removido ou rebaixado.".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(user_id: Uuid, role: GroupMemberRole) -> GroupMember {
        GroupMember {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn sole_admin_is_protected() {
        let admin_id = Uuid::new_v4();
        let members = vec![
            member(admin_id, GroupMemberRole::Admin),
            member(Uuid::new_v4(), GroupMemberRole::Member),
        ];
        assert!(ensure_not_last_admin(&members, admin_id).is_err());
    }

    #[test]
    fn regular_member_can_leave() {
        let member_id = Uuid::new_v4();
        let members = vec![
            member(Uuid::new_v4(), GroupMemberRole::Admin),
            member(member_id, GroupMemberRole::Member),
        ];
        assert!(ensure_not_last_admin(&members, member_id).is_ok());
    }

    #[test]
    fn admin_can_leave_when_another_admin_remains() {
        let admin_id = Uuid::new_v4();
        let members = vec![
            member(admin_id, GroupMemberRole::Admin),
            member(Uuid::new_v4(), GroupMemberRole::Admin),
        ];
        assert!(ensure_not_last_admin(&members, admin_id).is_ok());
    }
}
