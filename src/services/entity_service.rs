use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    db::EntityRepository,
    models::{
        auth::User,
        entity::{
            validate_council, validate_fund, CreateEntityPayload, Entity, UpdateEntityPayload,
        },
    },
};

#[derive(Clone)]
pub struct EntityService {
    entity_repo: EntityRepository,
}

impl EntityService {
    pub fn new(entity_repo: EntityRepository) -> Self {
        Self { entity_repo }
    }

    pub async fn create(&self, user: &User, payload: &CreateEntityPayload) -> Result<Entity, AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem cadastrar entes federados.".into(),
            ));
        }

        let today = Utc::now().date_naive();
        if let Some(council) = &payload.cultural_council {
            validate_council(council, today)?;
        }
        if let Some(fund) = &payload.cultural_fund {
            validate_fund(fund)?;
        }

        self.entity_repo.create(payload).await
    }

    pub async fn update(
        &self,
        user: &User,
        id: Uuid,
        patch: &UpdateEntityPayload,
    ) -> Result<Entity, AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem alterar entes federados.".into(),
            ));
        }

        let today = Utc::now().date_naive();
        if let Some(council) = &patch.cultural_council {
            validate_council(council, today)?;
        }
        if let Some(fund) = &patch.cultural_fund {
            validate_fund(fund)?;
        }

        self.entity_repo.update(id, patch).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Entity, AppError> {
        self.entity_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ente federado não encontrado.".into()))
    }

    pub async fn list(&self, pagination: &Pagination) -> Result<Vec<Entity>, AppError> {
        self.entity_repo.list(pagination).await
    }
}
