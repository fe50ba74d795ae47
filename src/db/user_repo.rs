use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{User, UserRole},
};

// Repositório de usuários: todas as interações com a tabela 'users'.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn create_user(
        &self,
        cpf_cnpj: &str,
        name: &str,
        email: &str,
        hashed_password: &str,
        phone: Option<&str>,
        city_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (cpf_cnpj, name, email, password_hash, phone, city_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(cpf_cnpj)
        .bind(name)
        .bind(email)
        .bind(hashed_password)
        .bind(phone)
        .bind(city_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from(e).on_unique_violation(|| {
                AppError::Conflict("CPF/CNPJ ou e-mail já cadastrado.".into())
            })
        })
    }

    pub async fn update_password(&self, id: Uuid, hashed_password: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(hashed_password)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Troca o papel do usuário. Recebe o executor para participar da mesma
    /// transação que cria/exclui o parecerista.
    pub async fn set_role<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        role: UserRole,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE users SET role = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(role)
            .execute(executor)
            .await?;
        Ok(())
    }
}
