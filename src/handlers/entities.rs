use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Pagination},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::entity::{CreateEntityPayload, Entity, UpdateEntityPayload},
};

// POST /api/entities
#[utoipa::path(
    post,
    path = "/api/entities",
    tag = "Entities",
    request_body = CreateEntityPayload,
    responses(
        (status = 201, description = "Ente federado cadastrado", body = Entity),
        (status = 400, description = "Datas do conselho ou do plano inválidas")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_entity(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateEntityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entity = app_state.entity_service.create(&user, &payload).await?;

    Ok((StatusCode::CREATED, Json(entity)))
}

// GET /api/entities — pública
#[utoipa::path(
    get,
    path = "/api/entities",
    tag = "Entities",
    params(Pagination),
    responses((status = 200, description = "Entes federados ativos", body = [Entity]))
)]
pub async fn list_entities(
    State(app_state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Entity>>, AppError> {
    let entities = app_state.entity_service.list(&pagination).await?;
    Ok(Json(entities))
}

// GET /api/entities/{id}
#[utoipa::path(
    get,
    path = "/api/entities/{id}",
    tag = "Entities",
    params(("id" = Uuid, Path, description = "ID do ente federado")),
    responses(
        (status = 200, description = "Ente federado", body = Entity),
        (status = 404, description = "Ente federado não encontrado")
    )
)]
pub async fn get_entity(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Entity>, AppError> {
    let entity = app_state.entity_service.get(id).await?;
    Ok(Json(entity))
}

// PUT /api/entities/{id}
#[utoipa::path(
    put,
    path = "/api/entities/{id}",
    tag = "Entities",
    request_body = UpdateEntityPayload,
    params(("id" = Uuid, Path, description = "ID do ente federado")),
    responses((status = 200, description = "Ente federado atualizado", body = Entity)),
    security(("api_jwt" = []))
)]
pub async fn update_entity(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateEntityPayload>,
) -> Result<Json<Entity>, AppError> {
    let entity = app_state.entity_service.update(&user, id, &patch).await?;
    Ok(Json(entity))
}
