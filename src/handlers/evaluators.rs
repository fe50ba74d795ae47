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
    models::evaluator::{
        CreateEvaluatorPayload, Evaluator, EvaluatorFilter, UpdateEvaluatorPayload,
    },
};

// POST /api/evaluators
#[utoipa::path(
    post,
    path = "/api/evaluators",
    tag = "Evaluators",
    request_body = CreateEvaluatorPayload,
    responses(
        (status = 201, description = "Parecerista cadastrado; usuário promovido", body = Evaluator),
        (status = 400, description = "Usuário já é parecerista ou ente não informado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_evaluator(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateEvaluatorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let evaluator = app_state.evaluator_service.create(&user, &payload).await?;

    Ok((StatusCode::CREATED, Json(evaluator)))
}

// GET /api/evaluators — pública
#[utoipa::path(
    get,
    path = "/api/evaluators",
    tag = "Evaluators",
    params(EvaluatorFilter, Pagination),
    responses((status = 200, description = "Pareceristas", body = [Evaluator]))
)]
pub async fn list_evaluators(
    State(app_state): State<AppState>,
    Query(filter): Query<EvaluatorFilter>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Evaluator>>, AppError> {
    let evaluators = app_state.evaluator_service.list(&filter, &pagination).await?;
    Ok(Json(evaluators))
}

// GET /api/evaluators/{id} — pública
#[utoipa::path(
    get,
    path = "/api/evaluators/{id}",
    tag = "Evaluators",
    params(("id" = Uuid, Path, description = "ID do parecerista")),
    responses(
        (status = 200, description = "Parecerista", body = Evaluator),
        (status = 404, description = "Parecerista não encontrado")
    )
)]
pub async fn get_evaluator(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Evaluator>, AppError> {
    let evaluator = app_state.evaluator_service.get(id).await?;
    Ok(Json(evaluator))
}

// PUT /api/evaluators/{id}
#[utoipa::path(
    put,
    path = "/api/evaluators/{id}",
    tag = "Evaluators",
    request_body = UpdateEvaluatorPayload,
    params(("id" = Uuid, Path, description = "ID do parecerista")),
    responses(
        (status = 200, description = "Parecerista atualizado", body = Evaluator),
        (status = 403, description = "Sem acesso a este parecerista")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_evaluator(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateEvaluatorPayload>,
) -> Result<Json<Evaluator>, AppError> {
    let evaluator = app_state.evaluator_service.update(&user, id, patch).await?;
    Ok(Json(evaluator))
}

// PATCH /api/evaluators/{id}/status
#[utoipa::path(
    patch,
    path = "/api/evaluators/{id}/status",
    tag = "Evaluators",
    params(("id" = Uuid, Path, description = "ID do parecerista")),
    responses((status = 200, description = "Status alternado", body = Evaluator)),
    security(("api_jwt" = []))
)]
pub async fn toggle_evaluator_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Evaluator>, AppError> {
    let evaluator = app_state.evaluator_service.toggle_status(&user, id).await?;
    Ok(Json(evaluator))
}

// DELETE /api/evaluators/{id} — exclusão física + rebaixamento do usuário
#[utoipa::path(
    delete,
    path = "/api/evaluators/{id}",
    tag = "Evaluators",
    params(("id" = Uuid, Path, description = "ID do parecerista")),
    responses((status = 204, description = "Parecerista excluído")),
    security(("api_jwt" = []))
)]
pub async fn delete_evaluator(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.evaluator_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
