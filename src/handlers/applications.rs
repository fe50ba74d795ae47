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
    models::application::{
        Application, ApplicationFilter, CreateApplicationPayload, UpdateApplicationPayload,
    },
};

// POST /api/applications
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = "Applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Inscrição criada como rascunho", body = Application),
        (status = 400, description = "Edital fechado, valor fora dos limites ou inscrição duplicada"),
        (status = 403, description = "Apenas agentes culturais")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_application(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let application = app_state
        .application_service
        .create(&user, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

// GET /api/applications/my-applications
#[utoipa::path(
    get,
    path = "/api/applications/my-applications",
    tag = "Applications",
    params(ApplicationFilter, Pagination),
    responses((status = 200, description = "Inscrições do usuário", body = [Application])),
    security(("api_jwt" = []))
)]
pub async fn list_my_applications(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filter): Query<ApplicationFilter>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = app_state
        .application_service
        .list_mine(&user, &filter, &pagination)
        .await?;

    Ok(Json(applications))
}

// GET /api/applications — apenas admin, sem filtro de posse
#[utoipa::path(
    get,
    path = "/api/applications",
    tag = "Applications",
    params(ApplicationFilter, Pagination),
    responses((status = 200, description = "Todas as inscrições", body = [Application])),
    security(("api_jwt" = []))
)]
pub async fn list_all_applications(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filter): Query<ApplicationFilter>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = app_state
        .application_service
        .list_all(&user, &filter, &pagination)
        .await?;

    Ok(Json(applications))
}

// GET /api/applications/{id}
#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    tag = "Applications",
    params(("id" = Uuid, Path, description = "ID da inscrição")),
    responses(
        (status = 200, description = "Inscrição", body = Application),
        (status = 403, description = "Inscrição de outro usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_application(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>, AppError> {
    let application = app_state.application_service.get(&user, id).await?;
    Ok(Json(application))
}

// PUT /api/applications/{id}
#[utoipa::path(
    put,
    path = "/api/applications/{id}",
    tag = "Applications",
    request_body = UpdateApplicationPayload,
    params(("id" = Uuid, Path, description = "ID da inscrição")),
    responses(
        (status = 200, description = "Inscrição atualizada", body = Application),
        (status = 400, description = "Inscrição fora do estado rascunho")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_application(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateApplicationPayload>,
) -> Result<Json<Application>, AppError> {
    let application = app_state
        .application_service
        .update(&user, id, &patch)
        .await?;

    Ok(Json(application))
}

// PATCH /api/applications/{id}/submit
#[utoipa::path(
    patch,
    path = "/api/applications/{id}/submit",
    tag = "Applications",
    params(("id" = Uuid, Path, description = "ID da inscrição")),
    responses(
        (status = 200, description = "Inscrição enviada", body = Application),
        (status = 400, description = "Fora do rascunho ou edital encerrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn submit_application(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>, AppError> {
    let application = app_state.application_service.submit(&user, id).await?;
    Ok(Json(application))
}
