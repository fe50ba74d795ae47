use crate::common::error::AppError;

// O fluxo de avaliação (parecer, aprovação, reprovação) é um ponto de
// extensão: o modelo de dados já comporta os estados evaluation/approved/
// rejected, mas nenhuma transição é exposta. As rotas existem para manter o
// contrato com o frontend e respondem 501.

// POST /api/evaluations
#[utoipa::path(
    post,
    path = "/api/evaluations",
    tag = "Evaluations",
    responses((status = 501, description = "Fluxo de avaliação não implementado")),
    security(("api_jwt" = []))
)]
pub async fn create_evaluation() -> AppError {
    AppError::NotImplemented
}

// GET /api/evaluations/pending
#[utoipa::path(
    get,
    path = "/api/evaluations/pending",
    tag = "Evaluations",
    responses((status = 501, description = "Fluxo de avaliação não implementado")),
    security(("api_jwt" = []))
)]
pub async fn list_pending_evaluations() -> AppError {
    AppError::NotImplemented
}

// PATCH /api/evaluations/{id}/decision
#[utoipa::path(
    patch,
    path = "/api/evaluations/{id}/decision",
    tag = "Evaluations",
    responses((status = 501, description = "Fluxo de avaliação não implementado")),
    security(("api_jwt" = []))
)]
pub async fn decide_evaluation() -> AppError {
    AppError::NotImplemented
}
