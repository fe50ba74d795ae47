use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::profile::{
        AgentProfile, CreatePortalPayload, EntityPortal, UpdatePortalPayload,
        UpsertProfilePayload,
    },
};

// GET /api/profiles/me
#[utoipa::path(
    get,
    path = "/api/profiles/me",
    tag = "Profiles",
    responses(
        (status = 200, description = "Perfil do usuário", body = AgentProfile),
        (status = 404, description = "Perfil ainda não criado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_profile(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<AgentProfile>, AppError> {
    let profile = app_state.profile_service.get_profile(user.id).await?;
    Ok(Json(profile))
}

// PUT /api/profiles/me — upsert
#[utoipa::path(
    put,
    path = "/api/profiles/me",
    tag = "Profiles",
    request_body = UpsertProfilePayload,
    responses((status = 200, description = "Perfil criado ou atualizado", body = AgentProfile)),
    security(("api_jwt" = []))
)]
pub async fn upsert_my_profile(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<UpsertProfilePayload>,
) -> Result<Json<AgentProfile>, AppError> {
    let profile = app_state
        .profile_service
        .upsert_profile(&user, &payload)
        .await?;

    Ok(Json(profile))
}

// GET /api/profiles/{user_id} — público
#[utoipa::path(
    get,
    path = "/api/profiles/{user_id}",
    tag = "Profiles",
    params(("user_id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Perfil público do agente", body = AgentProfile),
        (status = 404, description = "Perfil não encontrado")
    )
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<AgentProfile>, AppError> {
    let profile = app_state.profile_service.get_profile(user_id).await?;
    Ok(Json(profile))
}

// POST /api/portals
#[utoipa::path(
    post,
    path = "/api/portals",
    tag = "Portals",
    request_body = CreatePortalPayload,
    responses(
        (status = 201, description = "Portal criado", body = EntityPortal),
        (status = 409, description = "Ente já possui portal")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_portal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreatePortalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let portal = app_state.profile_service.create_portal(&user, &payload).await?;

    Ok((StatusCode::CREATED, Json(portal)))
}

// GET /api/portals/{entity_id} — público
#[utoipa::path(
    get,
    path = "/api/portals/{entity_id}",
    tag = "Portals",
    params(("entity_id" = Uuid, Path, description = "ID do ente federado")),
    responses(
        (status = 200, description = "Portal do ente", body = EntityPortal),
        (status = 404, description = "Portal não encontrado")
    )
)]
pub async fn get_portal(
    State(app_state): State<AppState>,
    Path(entity_id): Path<Uuid>,
) -> Result<Json<EntityPortal>, AppError> {
    let portal = app_state
        .profile_service
        .get_portal_by_entity(entity_id)
        .await?;

    Ok(Json(portal))
}

// PUT /api/portals/{id}
#[utoipa::path(
    put,
    path = "/api/portals/{id}",
    tag = "Portals",
    request_body = UpdatePortalPayload,
    params(("id" = Uuid, Path, description = "ID do portal")),
    responses((status = 200, description = "Portal atualizado", body = EntityPortal)),
    security(("api_jwt" = []))
)]
pub async fn update_portal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdatePortalPayload>,
) -> Result<Json<EntityPortal>, AppError> {
    let portal = app_state
        .profile_service
        .update_portal(&user, id, &patch)
        .await?;

    Ok(Json(portal))
}

// DELETE /api/portals/{id} — exclusão física
#[utoipa::path(
    delete,
    path = "/api/portals/{id}",
    tag = "Portals",
    params(("id" = Uuid, Path, description = "ID do portal")),
    responses((status = 204, description = "Portal excluído")),
    security(("api_jwt" = []))
)]
pub async fn delete_portal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.profile_service.delete_portal(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
