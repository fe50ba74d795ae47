use anyhow::Context;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    models::entity::{CreateEntityPayload, Entity, UpdateEntityPayload},
};

#[derive(Clone)]
pub struct EntityRepository {
    pool: PgPool,
}

impl EntityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Entity>, AppError> {
        let entity = sqlx::query_as::<_, Entity>("SELECT * FROM entities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entity)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let found: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM entities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    pub async fn list(&self, pagination: &Pagination) -> Result<Vec<Entity>, AppError> {
        let entities = sqlx::query_as::<_, Entity>(
            "SELECT * FROM entities WHERE is_active = TRUE ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(entities)
    }

    pub async fn create(&self, payload: &CreateEntityPayload) -> Result<Entity, AppError> {
        let council = payload
            .cultural_council
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .context("serializa conselho cultural")?;
        let fund = payload
            .cultural_fund
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .context("serializa fundo cultural")?;

        sqlx::query_as::<_, Entity>(
            r#"
            INSERT INTO entities (
                cpf_cnpj, name, entity_type, city_id, address,
                legal_representative, technical_representative,
                cultural_council, cultural_fund, bank_info, required_documents
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&payload.cpf_cnpj)
        .bind(&payload.name)
        .bind(payload.entity_type.as_deref().unwrap_or("municipal"))
        .bind(payload.city_id)
        .bind(&payload.address)
        .bind(&payload.legal_representative)
        .bind(&payload.technical_representative)
        .bind(council)
        .bind(fund)
        .bind(&payload.bank_info)
        .bind(&payload.required_documents)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from(e)
                .on_unique_violation(|| AppError::Conflict("CNPJ já cadastrado.".into()))
        })
    }

    /// Aplica apenas os campos presentes no patch (allow-list explícita).
    pub async fn update(&self, id: Uuid, patch: &UpdateEntityPayload) -> Result<Entity, AppError> {
        let mut qb = QueryBuilder::new("UPDATE entities SET updated_at = now()");

        if let Some(name) = &patch.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(entity_type) = &patch.entity_type {
            qb.push(", entity_type = ").push_bind(entity_type);
        }
        if let Some(city_id) = patch.city_id {
            qb.push(", city_id = ").push_bind(city_id);
        }
        if let Some(address) = &patch.address {
            qb.push(", address = ").push_bind(address);
        }
        if let Some(rep) = &patch.legal_representative {
            qb.push(", legal_representative = ").push_bind(rep);
        }
        if let Some(rep) = &patch.technical_representative {
            qb.push(", technical_representative = ").push_bind(rep);
        }
        if let Some(council) = &patch.cultural_council {
            let value = serde_json::to_value(council).context("serializa conselho cultural")?;
            qb.push(", cultural_council = ").push_bind(value);
        }
        if let Some(fund) = &patch.cultural_fund {
            let value = serde_json::to_value(fund).context("serializa fundo cultural")?;
            qb.push(", cultural_fund = ").push_bind(value);
        }
        if let Some(bank_info) = &patch.bank_info {
            qb.push(", bank_info = ").push_bind(bank_info);
        }
        if let Some(docs) = &patch.required_documents {
            qb.push(", required_documents = ").push_bind(docs);
        }
        if let Some(status) = patch.status {
            qb.push(", status = ").push_bind(status);
        }
        if let Some(is_active) = patch.is_active {
            qb.push(", is_active = ").push_bind(is_active);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let entity = qb
            .build_query_as::<Entity>()
            .fetch_optional(&self.pool)
            .await?;

        entity.ok_or_else(|| AppError::NotFound("Ente federado não encontrado.".into()))
    }
}
