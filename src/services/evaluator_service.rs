use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    db::{EvaluatorRepository, UserRepository},
    models::{
        auth::User,
        evaluator::{
            role_after_credential_grant, role_after_credential_revoke, CreateEvaluatorPayload,
            Evaluator, EvaluatorFilter, UpdateEvaluatorPayload,
        },
    },
};

#[derive(Clone)]
pub struct EvaluatorService {
    evaluator_repo: EvaluatorRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl EvaluatorService {
    pub fn new(evaluator_repo: EvaluatorRepository, user_repo: UserRepository, pool: PgPool) -> Self {
        Self {
            evaluator_repo,
            user_repo,
            pool,
        }
    }

    /// Cadastro de parecerista a partir de um usuário existente. A inserção e
    /// a promoção do papel acontecem na mesma transação.
    pub async fn create(
        &self,
        caller: &User,
        payload: &CreateEvaluatorPayload,
    ) -> Result<Evaluator, AppError> {
        if !caller.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem cadastrar pareceristas.".into(),
            ));
        }

        let entity_id = payload
            .entity_id
            .or(caller.entity_id)
            .ok_or_else(|| AppError::BadRequest("Informe o ente federado do parecerista.".into()))?;

        let target = self
            .user_repo
            .find_by_id(payload.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))?;

        let mut tx = self.pool.begin().await?;

        let evaluator = self
            .evaluator_repo
            .insert(&mut *tx, entity_id, payload)
            .await?;

        if let Some(role) = role_after_credential_grant(target.role) {
            self.user_repo.set_role(&mut *tx, target.id, role).await?;
        }

        tx.commit().await?;
        Ok(evaluator)
    }

    /// Edição: o próprio parecerista, um admin, ou alguém do mesmo ente.
    /// Não-admins perdem os campos entity_id/is_active do patch.
    pub async fn update(
        &self,
        caller: &User,
        id: Uuid,
        patch: UpdateEvaluatorPayload,
    ) -> Result<Evaluator, AppError> {
        let evaluator = self
            .evaluator_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Parecerista não encontrado.".into()))?;

        let same_entity = caller.entity_id == Some(evaluator.entity_id);
        if caller.id != evaluator.user_id && !caller.is_admin() && !same_entity {
            return Err(AppError::Forbidden(
                "Você não tem acesso a este parecerista.".into(),
            ));
        }

        let patch = if caller.is_admin() {
            patch
        } else {
            patch.stripped_for_non_admin()
        };

        self.evaluator_repo.update(id, &patch).await
    }

    pub async fn toggle_status(&self, caller: &User, id: Uuid) -> Result<Evaluator, AppError> {
        if !caller.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem ativar ou desativar pareceristas.".into(),
            ));
        }
        self.evaluator_repo.toggle_status(id).await
    }

    /// Exclusão física + rebaixamento do usuário para agente (admins mantêm o
    /// papel), na mesma transação.
    pub async fn delete(&self, caller: &User, id: Uuid) -> Result<(), AppError> {
        if !caller.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem excluir pareceristas.".into(),
            ));
        }

        let evaluator = self
            .evaluator_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Parecerista não encontrado.".into()))?;

        let target = self
            .user_repo
            .find_by_id(evaluator.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))?;

        let mut tx = self.pool.begin().await?;

        self.evaluator_repo.delete(&mut *tx, id).await?;

        if let Some(role) = role_after_credential_revoke(target.role) {
            self.user_repo.set_role(&mut *tx, target.id, role).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Evaluator, AppError> {
        self.evaluator_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Parecerista não encontrado.".into()))
    }

    pub async fn list(
        &self,
        filter: &EvaluatorFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Evaluator>, AppError> {
        self.evaluator_repo.list(filter, pagination).await
    }
}
