use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EntityRepository, ProfileRepository},
    models::{
        auth::User,
        profile::{
            AgentProfile, CreatePortalPayload, EntityPortal, UpdatePortalPayload,
            UpsertProfilePayload,
        },
    },
};

#[derive(Clone)]
pub struct ProfileService {
    profile_repo: ProfileRepository,
    entity_repo: EntityRepository,
}

impl ProfileService {
    pub fn new(profile_repo: ProfileRepository, entity_repo: EntityRepository) -> Self {
        Self {
            profile_repo,
            entity_repo,
        }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<AgentProfile, AppError> {
        self.profile_repo
            .find_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Perfil não encontrado.".into()))
    }

    /// Upsert do próprio perfil; primeiro acesso cria o documento.
    pub async fn upsert_profile(
        &self,
        user: &User,
        payload: &UpsertProfilePayload,
    ) -> Result<AgentProfile, AppError> {
        self.profile_repo
            .upsert_profile(
                user.id,
                payload.bio.as_deref(),
                payload.areas.as_deref(),
                payload.social_links.as_ref(),
            )
            .await
    }

    pub async fn get_portal_by_entity(&self, entity_id: Uuid) -> Result<EntityPortal, AppError> {
        self.profile_repo
            .find_portal_by_entity(entity_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Portal não encontrado.".into()))
    }

    pub async fn create_portal(
        &self,
        user: &User,
        payload: &CreatePortalPayload,
    ) -> Result<EntityPortal, AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem criar portais.".into(),
            ));
        }
        if !self.entity_repo.exists(payload.entity_id).await? {
            return Err(AppError::NotFound("Ente federado não encontrado.".into()));
        }
        self.profile_repo.create_portal(payload).await
    }

    pub async fn update_portal(
        &self,
        user: &User,
        id: Uuid,
        patch: &UpdatePortalPayload,
    ) -> Result<EntityPortal, AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem alterar portais.".into(),
            ));
        }
        self.profile_repo.update_portal(id, patch).await
    }

    pub async fn delete_portal(&self, user: &User, id: Uuid) -> Result<(), AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem excluir portais.".into(),
            ));
        }
        self.profile_repo.delete_portal(id).await
    }
}
