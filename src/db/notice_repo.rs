use anyhow::Context;
use serde_json::{json, Value};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::notice::{CreateNoticePayload, Notice, NoticeFilter, NoticeStatus, UpdateNoticePayload},
};

/// Recorte por cidade usado na listagem em duas fases.
#[derive(Debug, Clone, Copy)]
pub enum CityPartition {
    /// Editais da cidade do usuário
    Matching(Uuid),
    /// Editais das demais cidades (inclui editais sem cidade)
    Other(Uuid),
}

#[derive(Clone)]
pub struct NoticeRepository {
    pool: PgPool,
}

impl NoticeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>, AppError> {
        let notice = sqlx::query_as::<_, Notice>("SELECT * FROM notices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(notice)
    }

    pub async fn create(&self, payload: &CreateNoticePayload) -> Result<Notice, AppError> {
        let criteria = match &payload.evaluation_criteria {
            Some(list) => serde_json::to_value(list).context("serializa critérios")?,
            None => Value::Array(vec![]),
        };
        // Orçamento espelha os valores do edital quando não veio detalhado
        let budget = payload.budget.clone().unwrap_or_else(|| {
            json!({
                "totalValue": payload.total_value,
                "minApplicationValue": payload.min_application_value,
                "maxApplicationValue": payload.max_application_value,
            })
        });

        let notice = sqlx::query_as::<_, Notice>(
            r#"
            INSERT INTO notices (
                title, description, entity_id, city_id, start_date, end_date,
                total_value, min_application_value, max_application_value,
                status, categories, requirements, documents, evaluation_criteria,
                quotas, accessibility, stages, habilitation_documents, budget,
                appeal_period_days
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.entity_id)
        .bind(payload.city_id)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.total_value)
        .bind(payload.min_application_value)
        .bind(payload.max_application_value)
        .bind(payload.status.unwrap_or(NoticeStatus::Draft))
        .bind(payload.categories.clone().unwrap_or_default())
        .bind(payload.requirements.clone().unwrap_or_else(|| Value::Array(vec![])))
        .bind(payload.documents.clone().unwrap_or_else(|| Value::Array(vec![])))
        .bind(criteria)
        .bind(payload.quotas.clone().unwrap_or_else(|| json!({})))
        .bind(payload.accessibility.clone().unwrap_or_else(|| json!({})))
        .bind(payload.stages.clone().unwrap_or_else(|| Value::Array(vec![])))
        .bind(payload.habilitation_documents.clone().unwrap_or_else(|| Value::Array(vec![])))
        .bind(budget)
        .bind(payload.appeal_period_days.unwrap_or(3))
        .fetch_one(&self.pool)
        .await?;

        Ok(notice)
    }

    /// Aplica apenas os campos presentes no patch (allow-list explícita).
    pub async fn update(&self, id: Uuid, patch: &UpdateNoticePayload) -> Result<Notice, AppError> {
        let mut qb = QueryBuilder::new("UPDATE notices SET updated_at = now()");

        if let Some(title) = &patch.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(description) = &patch.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(city_id) = patch.city_id {
            qb.push(", city_id = ").push_bind(city_id);
        }
        if let Some(start_date) = patch.start_date {
            qb.push(", start_date = ").push_bind(start_date);
        }
        if let Some(end_date) = patch.end_date {
            qb.push(", end_date = ").push_bind(end_date);
        }
        if let Some(total_value) = patch.total_value {
            qb.push(", total_value = ").push_bind(total_value);
        }
        if let Some(min_value) = patch.min_application_value {
            qb.push(", min_application_value = ").push_bind(min_value);
        }
        if let Some(max_value) = patch.max_application_value {
            qb.push(", max_application_value = ").push_bind(max_value);
        }
        if let Some(status) = patch.status {
            qb.push(", status = ").push_bind(status);
        }
        if let Some(categories) = &patch.categories {
            qb.push(", categories = ").push_bind(categories);
        }
        if let Some(requirements) = &patch.requirements {
            qb.push(", requirements = ").push_bind(requirements);
        }
        if let Some(documents) = &patch.documents {
            qb.push(", documents = ").push_bind(documents);
        }
        if let Some(criteria) = &patch.evaluation_criteria {
            let value = serde_json::to_value(criteria).context("serializa critérios")?;
            qb.push(", evaluation_criteria = ").push_bind(value);
        }
        if let Some(quotas) = &patch.quotas {
            qb.push(", quotas = ").push_bind(quotas);
        }
        if let Some(accessibility) = &patch.accessibility {
            qb.push(", accessibility = ").push_bind(accessibility);
        }
        if let Some(stages) = &patch.stages {
            qb.push(", stages = ").push_bind(stages);
        }
        if let Some(docs) = &patch.habilitation_documents {
            qb.push(", habilitation_documents = ").push_bind(docs);
        }
        if let Some(budget) = &patch.budget {
            qb.push(", budget = ").push_bind(budget);
        }
        if let Some(days) = patch.appeal_period_days {
            qb.push(", appeal_period_days = ").push_bind(days);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let notice = qb
            .build_query_as::<Notice>()
            .fetch_optional(&self.pool)
            .await?;

        notice.ok_or_else(|| AppError::NotFound("Edital não encontrado.".into()))
    }

    /// Exclusão lógica: o edital vira `canceled` e some das listagens públicas.
    pub async fn cancel(&self, id: Uuid) -> Result<Notice, AppError> {
        let notice = sqlx::query_as::<_, Notice>(
            "UPDATE notices SET status = 'canceled', updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        notice.ok_or_else(|| AppError::NotFound("Edital não encontrado.".into()))
    }

    pub async fn list(
        &self,
        filter: &NoticeFilter,
        partition: Option<CityPartition>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notice>, AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM notices WHERE 1=1");
        push_filter(&mut qb, filter, partition);

        qb.push(" ORDER BY start_date DESC");
        qb.push(" LIMIT ").push_bind(limit);
        qb.push(" OFFSET ").push_bind(offset);

        let notices = qb.build_query_as::<Notice>().fetch_all(&self.pool).await?;
        Ok(notices)
    }

    pub async fn count(
        &self,
        filter: &NoticeFilter,
        partition: Option<CityPartition>,
    ) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM notices WHERE 1=1");
        push_filter(&mut qb, filter, partition);

        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }
}

fn push_filter<'a>(
    qb: &mut QueryBuilder<'a, Postgres>,
    filter: &'a NoticeFilter,
    partition: Option<CityPartition>,
) {
    // Listagem pública mostra apenas editais publicados, salvo filtro explícito
    qb.push(" AND status = ")
        .push_bind(filter.status.unwrap_or(NoticeStatus::Published));

    if let Some(category) = &filter.category {
        qb.push(" AND ").push_bind(category).push(" = ANY(categories)");
    }
    if let Some(entity_id) = filter.entity_id {
        qb.push(" AND entity_id = ").push_bind(entity_id);
    }
    if let Some(city_id) = filter.city_id {
        qb.push(" AND city_id = ").push_bind(city_id);
    }
    if let Some(start_after) = filter.start_after {
        qb.push(" AND start_date >= ").push_bind(start_after);
    }
    if let Some(end_before) = filter.end_before {
        qb.push(" AND end_date <= ").push_bind(end_before);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    match partition {
        Some(CityPartition::Matching(city_id)) => {
            qb.push(" AND city_id = ").push_bind(city_id);
        }
        Some(CityPartition::Other(city_id)) => {
            qb.push(" AND city_id IS DISTINCT FROM ").push_bind(city_id);
        }
        None => {}
    }
}
