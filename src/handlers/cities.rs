use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    config::AppState,
    models::city::{City, CityFilter},
};

// GET /api/cities — dado de referência público
#[utoipa::path(
    get,
    path = "/api/cities",
    tag = "Cities",
    params(CityFilter, Pagination),
    responses((status = 200, description = "Municípios", body = [City]))
)]
pub async fn list_cities(
    State(app_state): State<AppState>,
    Query(filter): Query<CityFilter>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<City>>, AppError> {
    let cities = app_state.city_repo.list(&filter, &pagination).await?;
    Ok(Json(cities))
}

// GET /api/cities/{id}
#[utoipa::path(
    get,
    path = "/api/cities/{id}",
    tag = "Cities",
    params(("id" = Uuid, Path, description = "ID do município")),
    responses(
        (status = 200, description = "Município", body = City),
        (status = 404, description = "Município não encontrado")
    )
)]
pub async fn get_city(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<City>, AppError> {
    let city = app_state
        .city_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Município não encontrado.".into()))?;

    Ok(Json(city))
}
