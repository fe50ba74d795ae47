use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::GroupRepository,
    models::{
        auth::User,
        group::{
            ensure_not_last_admin, AddMemberPayload, CreateGroupPayload, CulturalGroup,
            GroupDetail, GroupMember, GroupMemberRole, UpdateGroupPayload,
        },
    },
};

#[derive(Clone)]
pub struct GroupService {
    group_repo: GroupRepository,
    pool: PgPool,
}

impl GroupService {
    pub fn new(group_repo: GroupRepository, pool: PgPool) -> Self {
        Self { group_repo, pool }
    }

    /// Quem cria o coletivo entra como primeiro admin, na mesma transação.
    pub async fn create(
        &self,
        user: &User,
        payload: &CreateGroupPayload,
    ) -> Result<GroupDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let group = self
            .group_repo
            .insert(
                &mut *tx,
                &payload.name,
                payload.description.as_deref(),
                payload.documents.as_ref(),
                user.id,
            )
            .await?;

        let founder = self
            .group_repo
            .add_member(&mut *tx, group.id, user.id, GroupMemberRole::Admin)
            .await?;

        tx.commit().await?;

        Ok(GroupDetail {
            group,
            members: vec![founder],
        })
    }

    pub async fn get(&self, user: &User, id: Uuid) -> Result<GroupDetail, AppError> {
        let group = self.find_group(id).await?;
        let members = self.group_repo.members(id).await?;

        let is_member = members.iter().any(|m| m.user_id == user.id);
        if !is_member && !user.is_admin() {
            return Err(AppError::Forbidden(
                "Você não faz parte deste coletivo.".into(),
            ));
        }

        Ok(GroupDetail { group, members })
    }

    pub async fn list_mine(&self, user: &User) -> Result<Vec<CulturalGroup>, AppError> {
        self.group_repo.list_by_member(user.id).await
    }

    pub async fn update(
        &self,
        user: &User,
        id: Uuid,
        patch: &UpdateGroupPayload,
    ) -> Result<CulturalGroup, AppError> {
        self.ensure_group_admin(user, id).await?;
        self.group_repo.update(id, patch).await
    }

    /// Exclusão lógica do coletivo.
    pub async fn deactivate(&self, user: &User, id: Uuid) -> Result<(), AppError> {
        self.ensure_group_admin(user, id).await?;
        self.group_repo.deactivate(id).await
    }

    pub async fn add_member(
        &self,
        user: &User,
        group_id: Uuid,
        payload: &AddMemberPayload,
    ) -> Result<GroupMember, AppError> {
        self.ensure_group_admin(user, group_id).await?;
        self.group_repo
            .add_member(
                &self.pool,
                group_id,
                payload.user_id,
                payload.role.unwrap_or(GroupMemberRole::Member),
            )
            .await
    }

    /// Remoção de membro: admin do coletivo, admin global, ou o próprio
    /// membro saindo. O último admin nunca sai.
    pub async fn remove_member(
        &self,
        user: &User,
        group_id: Uuid,
        member_user_id: Uuid,
    ) -> Result<(), AppError> {
        if user.id != member_user_id {
            self.ensure_group_admin(user, group_id).await?;
        } else {
            self.find_group(group_id).await?;
        }

        let members = self.group_repo.members(group_id).await?;
        if !members.iter().any(|m| m.user_id == member_user_id) {
            return Err(AppError::NotFound("Membro não encontrado no coletivo.".into()));
        }
        ensure_not_last_admin(&members, member_user_id)?;

        self.group_repo.remove_member(group_id, member_user_id).await
    }

    pub async fn change_member_role(
        &self,
        user: &User,
        group_id: Uuid,
        member_user_id: Uuid,
        role: GroupMemberRole,
    ) -> Result<GroupMember, AppError> {
        self.ensure_group_admin(user, group_id).await?;

        if role == GroupMemberRole::Member {
            // rebaixamento passa pela guarda do último admin
            let members = self.group_repo.members(group_id).await?;
            ensure_not_last_admin(&members, member_user_id)?;
        }

        self.group_repo
            .set_member_role(group_id, member_user_id, role)
            .await
    }

    async fn find_group(&self, id: Uuid) -> Result<CulturalGroup, AppError> {
        let group = self
            .group_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Coletivo não encontrado.".into()))?;

        if !group.is_active {
            return Err(AppError::NotFound("Coletivo não encontrado.".into()));
        }
        Ok(group)
    }

    /// Admin do coletivo ou admin global.
    async fn ensure_group_admin(&self, user: &User, group_id: Uuid) -> Result<(), AppError> {
        self.find_group(group_id).await?;

        if user.is_admin() {
            return Ok(());
        }

        let members = self.group_repo.members(group_id).await?;
        let is_group_admin = members
            .iter()
            .any(|m| m.user_id == user.id && m.role == GroupMemberRole::Admin);

        if !is_group_admin {
            return Err(AppError::Forbidden(
                "Apenas administradores do coletivo podem realizar esta ação.".into(),
            ));
        }
        Ok(())
    }
}
