use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::application::{
        Application, ApplicationFilter, CreateApplicationPayload, UpdateApplicationPayload,
    },
};

#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        let application =
            sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(application)
    }

    /// A unicidade (user_id, notice_id) é garantida por constraint do banco;
    /// a violação vira 400, como o cliente espera.
    pub async fn create(
        &self,
        user_id: Uuid,
        payload: &CreateApplicationPayload,
    ) -> Result<Application, AppError> {
        sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (
                notice_id, user_id, project_name, project_description,
                requested_amount, form_data, documents
            )
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, '{}'::jsonb), COALESCE($7, '[]'::jsonb))
            RETURNING *
            "#,
        )
        .bind(payload.notice_id)
        .bind(user_id)
        .bind(&payload.project_name)
        .bind(&payload.project_description)
        .bind(payload.requested_amount)
        .bind(&payload.form_data)
        .bind(&payload.documents)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from(e).on_unique_violation(|| {
                AppError::BadRequest("Você já possui uma inscrição neste edital.".into())
            })
        })
    }

    /// Aplica apenas os campos presentes no patch (allow-list explícita).
    pub async fn update(
        &self,
        id: Uuid,
        patch: &UpdateApplicationPayload,
    ) -> Result<Application, AppError> {
        let mut qb = QueryBuilder::new("UPDATE applications SET updated_at = now()");

        if let Some(project_name) = &patch.project_name {
            qb.push(", project_name = ").push_bind(project_name);
        }
        if let Some(description) = &patch.project_description {
            qb.push(", project_description = ").push_bind(description);
        }
        if let Some(amount) = patch.requested_amount {
            qb.push(", requested_amount = ").push_bind(amount);
        }
        if let Some(form_data) = &patch.form_data {
            qb.push(", form_data = ").push_bind(form_data);
        }
        if let Some(documents) = &patch.documents {
            qb.push(", documents = ").push_bind(documents);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let application = qb
            .build_query_as::<Application>()
            .fetch_optional(&self.pool)
            .await?;

        application.ok_or_else(|| AppError::NotFound("Inscrição não encontrada.".into()))
    }

    pub async fn submit(
        &self,
        id: Uuid,
        submitted_at: DateTime<Utc>,
    ) -> Result<Application, AppError> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = 'submitted', submitted_at = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(submitted_at)
        .fetch_optional(&self.pool)
        .await?;

        application.ok_or_else(|| AppError::NotFound("Inscrição não encontrada.".into()))
    }

    pub async fn list(
        &self,
        owner: Option<Uuid>,
        filter: &ApplicationFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Application>, AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM applications WHERE 1=1");
        push_filter(&mut qb, owner, filter);

        qb.push(" ORDER BY created_at DESC");
        qb.push(" LIMIT ").push_bind(limit);
        qb.push(" OFFSET ").push_bind(offset);

        let applications = qb
            .build_query_as::<Application>()
            .fetch_all(&self.pool)
            .await?;
        Ok(applications)
    }

    pub async fn count(
        &self,
        owner: Option<Uuid>,
        filter: &ApplicationFilter,
    ) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM applications WHERE 1=1");
        push_filter(&mut qb, owner, filter);

        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, owner: Option<Uuid>, filter: &ApplicationFilter) {
    if let Some(user_id) = owner {
        qb.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(notice_id) = filter.notice_id {
        qb.push(" AND notice_id = ").push_bind(notice_id);
    }
}
