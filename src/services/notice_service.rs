use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    db::{CityPartition, EntityRepository, NoticeRepository},
    models::{
        auth::User,
        notice::{
            validate_notice_window, CreateNoticePayload, Notice, NoticeFilter, UpdateNoticePayload,
        },
    },
};

#[derive(Clone)]
pub struct NoticeService {
    notice_repo: NoticeRepository,
    entity_repo: EntityRepository,
}

impl NoticeService {
    pub fn new(notice_repo: NoticeRepository, entity_repo: EntityRepository) -> Self {
        Self {
            notice_repo,
            entity_repo,
        }
    }

    pub async fn create(&self, user: &User, payload: &CreateNoticePayload) -> Result<Notice, AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem criar editais.".into(),
            ));
        }

        if !self.entity_repo.exists(payload.entity_id).await? {
            return Err(AppError::NotFound("Ente federado não encontrado.".into()));
        }

        validate_notice_window(
            payload.start_date,
            payload.end_date,
            payload.min_application_value,
            payload.max_application_value,
        )?;

        self.notice_repo.create(payload).await
    }

    /// Atualização genérica (inclui as transições publish/close via `status`).
    /// As invariantes de datas e valores valem sobre o resultado do patch.
    pub async fn update(
        &self,
        user: &User,
        id: Uuid,
        patch: &UpdateNoticePayload,
    ) -> Result<Notice, AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem alterar editais.".into(),
            ));
        }

        let current = self
            .notice_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Edital não encontrado.".into()))?;

        validate_notice_window(
            patch.start_date.unwrap_or(current.start_date),
            patch.end_date.unwrap_or(current.end_date),
            patch.min_application_value.unwrap_or(current.min_application_value),
            patch.max_application_value.unwrap_or(current.max_application_value),
        )?;

        self.notice_repo.update(id, patch).await
    }

    /// "Exclusão" de edital é cancelamento; o registro permanece.
    pub async fn cancel(&self, user: &User, id: Uuid) -> Result<Notice, AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem cancelar editais.".into(),
            ));
        }
        self.notice_repo.cancel(id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Notice, AppError> {
        self.notice_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Edital não encontrado.".into()))
    }

    /// Listagem pública. Se o chamador está autenticado, tem cidade e não
    /// filtrou por cidade, a página é montada em duas fases: primeiro os
    /// editais da cidade dele, depois o restante da página com os demais.
    /// As duas partições são ordenadas por start_date desc e concatenadas sem
    /// reordenação global — a página resultante não é globalmente ordenada
    /// quando as duas contribuem.
    pub async fn list(
        &self,
        caller: Option<&User>,
        filter: &NoticeFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Notice>, AppError> {
        let limit = pagination.limit();
        let offset = pagination.offset();

        let user_city = caller.and_then(|u| u.city_id);
        let city_priority = match (user_city, filter.city_id) {
            (Some(city), None) => Some(city),
            _ => None,
        };

        let Some(city) = city_priority else {
            return self.notice_repo.list(filter, None, limit, offset).await;
        };

        let city_total = self
            .notice_repo
            .count(filter, Some(CityPartition::Matching(city)))
            .await?;

        let mut page = self
            .notice_repo
            .list(filter, Some(CityPartition::Matching(city)), limit, offset)
            .await?;

        if let Some((other_offset, other_limit)) =
            remainder_window(offset, limit, city_total, page.len() as i64)
        {
            let rest = self
                .notice_repo
                .list(
                    filter,
                    Some(CityPartition::Other(city)),
                    other_limit,
                    other_offset,
                )
                .await?;
            page.extend(rest);
        }

        Ok(page)
    }
}

/// Janela (offset, limit) da segunda partição, descontando quantas linhas da
/// primeira já foram consumidas nesta página e nas anteriores.
fn remainder_window(
    offset: i64,
    limit: i64,
    city_total: i64,
    fetched_from_city: i64,
) -> Option<(i64, i64)> {
    let remaining = limit - fetched_from_city;
    if remaining <= 0 {
        return None;
    }
    let other_offset = (offset - city_total).max(0);
    Some((other_offset, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cenário de referência: 3 editais na cidade do usuário, limit 4.
    #[test]
    fn first_page_fills_remainder_from_other_cities() {
        // página 1: vieram os 3 da cidade, falta 1
        assert_eq!(remainder_window(0, 4, 3, 3), Some((0, 1)));
    }

    #[test]
    fn second_page_skips_rows_already_served() {
        // página 2 (offset 4): partição da cidade esgotada, já serviu 1 das demais
        assert_eq!(remainder_window(4, 4, 3, 0), Some((1, 4)));
    }

    #[test]
    fn no_remainder_when_city_fills_the_page() {
        assert_eq!(remainder_window(0, 4, 10, 4), None);
    }

    #[test]
    fn empty_city_partition_degenerates_to_plain_paging() {
        assert_eq!(remainder_window(0, 10, 0, 0), Some((0, 10)));
        assert_eq!(remainder_window(10, 10, 0, 0), Some((10, 10)));
    }
}
