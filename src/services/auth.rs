use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, RegisterUserPayload, User, UserRole},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    jwt_expires_hours: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, jwt_expires_hours: i64) -> Self {
        Self {
            user_repo,
            jwt_secret,
            jwt_expires_hours,
        }
    }

    /// Registro público: todo novo usuário nasce como agente cultural.
    pub async fn register_user(&self, payload: &RegisterUserPayload) -> Result<String, AppError> {
        let hashed_password = hash_password(payload.password.clone()).await?;

        let new_user = self
            .user_repo
            .create_user(
                &payload.cpf_cnpj,
                &payload.name,
                &payload.email,
                &hashed_password,
                payload.phone.as_deref(),
                payload.city_id,
            )
            .await?;

        create_token(
            &self.jwt_secret,
            new_user.id,
            new_user.role,
            self.jwt_expires_hours,
        )
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::InvalidCredentials);
        }

        let is_password_valid = verify_password(password.to_owned(), user.password_hash.clone()).await?;
        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        create_token(&self.jwt_secret, user.id, user.role, self.jwt_expires_hours)
    }

    /// Resolve o token para o usuário. Usuário removido ou desativado conta
    /// como credencial inválida, nunca como 404.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(&self.jwt_secret, token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(AppError::InvalidToken);
        }
        Ok(user)
    }

    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let matches = verify_password(current_password.to_owned(), user.password_hash.clone()).await?;
        if !matches {
            return Err(AppError::InvalidCredentials);
        }

        let hashed = hash_password(new_password.to_owned()).await?;
        self.user_repo.update_password(user.id, &hashed).await
    }
}

// Hashing roda em thread separada para não bloquear o executor.
async fn hash_password(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    let valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(valid)
}

pub(crate) fn create_token(
    secret: &str,
    user_id: Uuid,
    role: UserRole,
    expires_hours: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::hours(expires_hours);

    let claims = Claims {
        sub: user_id,
        role,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

pub(crate) fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map_err(|_| AppError::InvalidToken)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "segredo-de-teste";

    #[test]
    fn token_round_trip_preserves_subject_and_role() {
        let user_id = Uuid::new_v4();
        let token = create_token(SECRET, user_id, UserRole::Agent, 24).unwrap();

        let claims = decode_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Agent);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let token = create_token(SECRET, Uuid::new_v4(), UserRole::Admin, 24).unwrap();
        let result = decode_token("outro-segredo", &token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            decode_token(SECRET, "nem-de-longe-um-jwt"),
            Err(AppError::InvalidToken)
        ));
    }
}
