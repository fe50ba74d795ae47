use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    models::evaluator::{CreateEvaluatorPayload, Evaluator, EvaluatorFilter, UpdateEvaluatorPayload},
};

#[derive(Clone)]
pub struct EvaluatorRepository {
    pool: PgPool,
}

impl EvaluatorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Evaluator>, AppError> {
        let evaluator = sqlx::query_as::<_, Evaluator>("SELECT * FROM evaluators WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(evaluator)
    }

    /// Insert dentro da transação que também promove o usuário. A constraint
    /// única em user_id fecha a corrida de duas criações simultâneas.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        entity_id: Uuid,
        payload: &CreateEvaluatorPayload,
    ) -> Result<Evaluator, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Evaluator>(
            r#"
            INSERT INTO evaluators (user_id, entity_id, specialties, biography, education, experience)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(payload.user_id)
        .bind(entity_id)
        .bind(payload.specialties.clone().unwrap_or_default())
        .bind(&payload.biography)
        .bind(&payload.education)
        .bind(&payload.experience)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            AppError::from(e).on_unique_violation(|| {
                AppError::BadRequest("Este usuário já está cadastrado como parecerista.".into())
            })
        })
    }

    /// Aplica apenas os campos presentes no patch (allow-list explícita).
    pub async fn update(
        &self,
        id: Uuid,
        patch: &UpdateEvaluatorPayload,
    ) -> Result<Evaluator, AppError> {
        let mut qb = QueryBuilder::new("UPDATE evaluators SET updated_at = now()");

        if let Some(specialties) = &patch.specialties {
            qb.push(", specialties = ").push_bind(specialties);
        }
        if let Some(biography) = &patch.biography {
            qb.push(", biography = ").push_bind(biography);
        }
        if let Some(education) = &patch.education {
            qb.push(", education = ").push_bind(education);
        }
        if let Some(experience) = &patch.experience {
            qb.push(", experience = ").push_bind(experience);
        }
        if let Some(entity_id) = patch.entity_id {
            qb.push(", entity_id = ").push_bind(entity_id);
        }
        if let Some(is_active) = patch.is_active {
            qb.push(", is_active = ").push_bind(is_active);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let evaluator = qb
            .build_query_as::<Evaluator>()
            .fetch_optional(&self.pool)
            .await?;

        evaluator.ok_or_else(|| AppError::NotFound("Parecerista não encontrado.".into()))
    }

    pub async fn toggle_status(&self, id: Uuid) -> Result<Evaluator, AppError> {
        let evaluator = sqlx::query_as::<_, Evaluator>(
            "UPDATE evaluators SET is_active = NOT is_active, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        evaluator.ok_or_else(|| AppError::NotFound("Parecerista não encontrado.".into()))
    }

    /// Exclusão física, dentro da transação que rebaixa o usuário.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM evaluators WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn list(
        &self,
        filter: &EvaluatorFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Evaluator>, AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM evaluators WHERE 1=1");

        if let Some(entity_id) = filter.entity_id {
            qb.push(" AND entity_id = ").push_bind(entity_id);
        }
        if let Some(specialty) = &filter.specialty {
            qb.push(" AND ").push_bind(specialty).push(" = ANY(specialties)");
        }
        if let Some(is_active) = filter.is_active {
            qb.push(" AND is_active = ").push_bind(is_active);
        }

        qb.push(" ORDER BY created_at DESC");
        qb.push(" LIMIT ").push_bind(pagination.limit());
        qb.push(" OFFSET ").push_bind(pagination.offset());

        let evaluators = qb
            .build_query_as::<Evaluator>()
            .fetch_all(&self.pool)
            .await?;
        Ok(evaluators)
    }
}
