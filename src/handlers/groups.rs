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
    models::group::{
        AddMemberPayload, ChangeMemberRolePayload, CreateGroupPayload, CulturalGroup,
        GroupDetail, GroupMember, UpdateGroupPayload,
    },
};

// POST /api/groups
#[utoipa::path(
    post,
    path = "/api/groups",
    tag = "Groups",
    request_body = CreateGroupPayload,
    responses((status = 201, description = "Coletivo criado; criador vira admin", body = GroupDetail)),
    security(("api_jwt" = []))
)]
pub async fn create_group(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateGroupPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = app_state.group_service.create(&user, &payload).await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /api/groups/my-groups
#[utoipa::path(
    get,
    path = "/api/groups/my-groups",
    tag = "Groups",
    responses((status = 200, description = "Coletivos do usuário", body = [CulturalGroup])),
    security(("api_jwt" = []))
)]
pub async fn list_my_groups(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<CulturalGroup>>, AppError> {
    let groups = app_state.group_service.list_mine(&user).await?;
    Ok(Json(groups))
}

// GET /api/groups/{id}
#[utoipa::path(
    get,
    path = "/api/groups/{id}",
    tag = "Groups",
    params(("id" = Uuid, Path, description = "ID do coletivo")),
    responses(
        (status = 200, description = "Coletivo com membros", body = GroupDetail),
        (status = 403, description = "Não é membro do coletivo")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_group(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<GroupDetail>, AppError> {
    let detail = app_state.group_service.get(&user, id).await?;
    Ok(Json(detail))
}

// PUT /api/groups/{id}
#[utoipa::path(
    put,
    path = "/api/groups/{id}",
    tag = "Groups",
    request_body = UpdateGroupPayload,
    params(("id" = Uuid, Path, description = "ID do coletivo")),
    responses((status = 200, description = "Coletivo atualizado", body = CulturalGroup)),
    security(("api_jwt" = []))
)]
pub async fn update_group(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateGroupPayload>,
) -> Result<Json<CulturalGroup>, AppError> {
    let group = app_state.group_service.update(&user, id, &patch).await?;
    Ok(Json(group))
}

// DELETE /api/groups/{id} — exclusão lógica
#[utoipa::path(
    delete,
    path = "/api/groups/{id}",
    tag = "Groups",
    params(("id" = Uuid, Path, description = "ID do coletivo")),
    responses((status = 204, description = "Coletivo desativado")),
    security(("api_jwt" = []))
)]
pub async fn delete_group(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.group_service.deactivate(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/groups/{id}/members
#[utoipa::path(
    post,
    path = "/api/groups/{id}/members",
    tag = "Groups",
    request_body = AddMemberPayload,
    params(("id" = Uuid, Path, description = "ID do coletivo")),
    responses(
        (status = 201, description = "Membro adicionado", body = GroupMember),
        (status = 400, description = "Usuário já é membro")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_group_member(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddMemberPayload>,
) -> Result<impl IntoResponse, AppError> {
    let member = app_state
        .group_service
        .add_member(&user, id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(member)))
}

// PATCH /api/groups/{id}/members/{user_id}
#[utoipa::path(
    patch,
    path = "/api/groups/{id}/members/{user_id}",
    tag = "Groups",
    request_body = ChangeMemberRolePayload,
    params(
        ("id" = Uuid, Path, description = "ID do coletivo"),
        ("user_id" = Uuid, Path, description = "ID do membro")
    ),
    responses(
        (status = 200, description = "Papel do membro alterado", body = GroupMember),
        (status = 400, description = "Rebaixaria o último admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_group_member_role(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, member_user_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ChangeMemberRolePayload>,
) -> Result<Json<GroupMember>, AppError> {
    let member = app_state
        .group_service
        .change_member_role(&user, id, member_user_id, payload.role)
        .await?;

    Ok(Json(member))
}

// DELETE /api/groups/{id}/members/{user_id}
#[utoipa::path(
    delete,
    path = "/api/groups/{id}/members/{user_id}",
    tag = "Groups",
    params(
        ("id" = Uuid, Path, description = "ID do coletivo"),
        ("user_id" = Uuid, Path, description = "ID do membro")
    ),
    responses(
        (status = 204, description = "Membro removido"),
        (status = 400, description = "Removeria o último admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_group_member(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, member_user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    app_state
        .group_service
        .remove_member(&user, id, member_user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
