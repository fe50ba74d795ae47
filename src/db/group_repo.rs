use serde_json::Value;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::group::{CulturalGroup, GroupMember, GroupMemberRole, UpdateGroupPayload},
};

#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CulturalGroup>, AppError> {
        let group =
            sqlx::query_as::<_, CulturalGroup>("SELECT * FROM cultural_groups WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(group)
    }

    /// Criação junto com o primeiro membro admin, na mesma transação.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
        documents: Option<&Value>,
        created_by: Uuid,
    ) -> Result<CulturalGroup, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let group = sqlx::query_as::<_, CulturalGroup>(
            r#"
            INSERT INTO cultural_groups (name, description, documents, created_by)
            VALUES ($1, $2, COALESCE($3, '[]'::jsonb), $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(documents)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(group)
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: &UpdateGroupPayload,
    ) -> Result<CulturalGroup, AppError> {
        let mut qb = QueryBuilder::new("UPDATE cultural_groups SET updated_at = now()");

        if let Some(name) = &patch.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(description) = &patch.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(documents) = &patch.documents {
            qb.push(", documents = ").push_bind(documents);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let group = qb
            .build_query_as::<CulturalGroup>()
            .fetch_optional(&self.pool)
            .await?;

        group.ok_or_else(|| AppError::NotFound("Coletivo não encontrado.".into()))
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE cultural_groups SET is_active = FALSE, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_by_member(&self, user_id: Uuid) -> Result<Vec<CulturalGroup>, AppError> {
        let groups = sqlx::query_as::<_, CulturalGroup>(
            r#"
            SELECT g.* FROM cultural_groups g
            JOIN cultural_group_members m ON m.group_id = g.id
            WHERE m.user_id = $1 AND g.is_active = TRUE
            ORDER BY g.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(groups)
    }

    pub async fn members(&self, group_id: Uuid) -> Result<Vec<GroupMember>, AppError> {
        let members = sqlx::query_as::<_, GroupMember>(
            "SELECT * FROM cultural_group_members WHERE group_id = $1 ORDER BY joined_at",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    pub async fn add_member<'e, E>(
        &self,
        executor: E,
        group_id: Uuid,
        user_id: Uuid,
        role: GroupMemberRole,
    ) -> Result<GroupMember, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, GroupMember>(
            r#"
            INSERT INTO cultural_group_members (group_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            AppError::from(e).on_unique_violation(|| {
                AppError::BadRequest("Este usuário já é membro do coletivo.".into())
            })
        })
    }

    pub async fn remove_member(&self, group_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM cultural_group_members WHERE group_id = $1 AND user_id = $2")
            .bind(group_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_member_role(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        role: GroupMemberRole,
    ) -> Result<GroupMember, AppError> {
        let member = sqlx::query_as::<_, GroupMember>(
            r#"
            UPDATE cultural_group_members SET role = $3
            WHERE group_id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        member.ok_or_else(|| AppError::NotFound("Membro não encontrado no coletivo.".into()))
    }
}
