use serde_json::{json, Value};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::profile::{AgentProfile, CreatePortalPayload, EntityPortal, UpdatePortalPayload},
};

#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    //  Perfil do agente (1:1 com users, upsert)
    // ------------------------------------------------------------------

    pub async fn find_profile(&self, user_id: Uuid) -> Result<Option<AgentProfile>, AppError> {
        let profile =
            sqlx::query_as::<_, AgentProfile>("SELECT * FROM agent_profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(profile)
    }

    // Campo omitido no payload preserva o valor atual; a API não oferece como
    // limpar bio/areas/social_links de volta a vazio (enviar o valor vazio
    // explícito sobrescreve).
    pub async fn upsert_profile(
        &self,
        user_id: Uuid,
        bio: Option<&str>,
        areas: Option<&[String]>,
        social_links: Option<&Value>,
    ) -> Result<AgentProfile, AppError> {
        let profile = sqlx::query_as::<_, AgentProfile>(
            r#"
            INSERT INTO agent_profiles (user_id, bio, areas, social_links)
            VALUES ($1, $2, COALESCE($3, '{}'::text[]), COALESCE($4, '{}'::jsonb))
            ON CONFLICT (user_id) DO UPDATE SET
                bio          = COALESCE(EXCLUDED.bio, agent_profiles.bio),
                areas        = CASE WHEN $3 IS NULL THEN agent_profiles.areas ELSE EXCLUDED.areas END,
                social_links = CASE WHEN $4 IS NULL THEN agent_profiles.social_links ELSE EXCLUDED.social_links END,
                updated_at   = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(bio)
        .bind(areas)
        .bind(social_links)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    // ------------------------------------------------------------------
    //  Portal do ente federado
    // ------------------------------------------------------------------

    pub async fn find_portal(&self, id: Uuid) -> Result<Option<EntityPortal>, AppError> {
        let portal = sqlx::query_as::<_, EntityPortal>("SELECT * FROM entity_portals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(portal)
    }

    pub async fn find_portal_by_entity(
        &self,
        entity_id: Uuid,
    ) -> Result<Option<EntityPortal>, AppError> {
        let portal =
            sqlx::query_as::<_, EntityPortal>("SELECT * FROM entity_portals WHERE entity_id = $1")
                .bind(entity_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(portal)
    }

    pub async fn create_portal(&self, payload: &CreatePortalPayload) -> Result<EntityPortal, AppError> {
        sqlx::query_as::<_, EntityPortal>(
            r#"
            INSERT INTO entity_portals (entity_id, title, description, theme, links)
            VALUES ($1, $2, $3, COALESCE($4, '{}'::jsonb), COALESCE($5, '[]'::jsonb))
            RETURNING *
            "#,
        )
        .bind(payload.entity_id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.theme.clone().unwrap_or_else(|| json!({})))
        .bind(payload.links.clone().unwrap_or_else(|| Value::Array(vec![])))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from(e).on_unique_violation(|| {
                AppError::Conflict("Este ente federado já possui um portal.".into())
            })
        })
    }

    pub async fn update_portal(
        &self,
        id: Uuid,
        patch: &UpdatePortalPayload,
    ) -> Result<EntityPortal, AppError> {
        let mut qb = QueryBuilder::new("UPDATE entity_portals SET updated_at = now()");

        if let Some(title) = &patch.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(description) = &patch.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(theme) = &patch.theme {
            qb.push(", theme = ").push_bind(theme);
        }
        if let Some(links) = &patch.links {
            qb.push(", links = ").push_bind(links);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let portal = qb
            .build_query_as::<EntityPortal>()
            .fetch_optional(&self.pool)
            .await?;

        portal.ok_or_else(|| AppError::NotFound("Portal não encontrado.".into()))
    }

    /// Exclusão física (portal é recriável a qualquer momento).
    pub async fn delete_portal(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM entity_portals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Portal não encontrado.".into()));
        }
        Ok(())
    }
}
