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
    middleware::auth::{AuthenticatedUser, OptionalUser},
    models::notice::{CreateNoticePayload, Notice, NoticeFilter, UpdateNoticePayload},
};

// POST /api/notices
#[utoipa::path(
    post,
    path = "/api/notices",
    tag = "Notices",
    request_body = CreateNoticePayload,
    responses(
        (status = 201, description = "Edital criado", body = Notice),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_notice(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateNoticePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let notice = app_state.notice_service.create(&user, &payload).await?;

    Ok((StatusCode::CREATED, Json(notice)))
}

// GET /api/notices — pública; prioriza a cidade do usuário autenticado
#[utoipa::path(
    get,
    path = "/api/notices",
    tag = "Notices",
    params(NoticeFilter, Pagination),
    responses((status = 200, description = "Página de editais", body = [Notice]))
)]
pub async fn list_notices(
    State(app_state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Query(filter): Query<NoticeFilter>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Notice>>, AppError> {
    let notices = app_state
        .notice_service
        .list(user.as_ref(), &filter, &pagination)
        .await?;

    Ok(Json(notices))
}

// GET /api/notices/{id}
#[utoipa::path(
    get,
    path = "/api/notices/{id}",
    tag = "Notices",
    params(("id" = Uuid, Path, description = "ID do edital")),
    responses(
        (status = 200, description = "Edital", body = Notice),
        (status = 404, description = "Edital não encontrado")
    )
)]
pub async fn get_notice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Notice>, AppError> {
    let notice = app_state.notice_service.get(id).await?;
    Ok(Json(notice))
}

// PUT /api/notices/{id}
#[utoipa::path(
    put,
    path = "/api/notices/{id}",
    tag = "Notices",
    request_body = UpdateNoticePayload,
    params(("id" = Uuid, Path, description = "ID do edital")),
    responses(
        (status = 200, description = "Edital atualizado", body = Notice),
        (status = 400, description = "Patch viola invariantes do edital")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_notice(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateNoticePayload>,
) -> Result<Json<Notice>, AppError> {
    let notice = app_state.notice_service.update(&user, id, &patch).await?;
    Ok(Json(notice))
}

// DELETE /api/notices/{id} — exclusão lógica (status = canceled)
#[utoipa::path(
    delete,
    path = "/api/notices/{id}",
    tag = "Notices",
    params(("id" = Uuid, Path, description = "ID do edital")),
    responses((status = 200, description = "Edital cancelado", body = Notice)),
    security(("api_jwt" = []))
)]
pub async fn delete_notice(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Notice>, AppError> {
    let notice = app_state.notice_service.cancel(&user, id).await?;
    Ok(Json(notice))
}
