use serde::Deserialize;
use utoipa::IntoParams;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

// Parâmetros de paginação aceitos por todas as listagens.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    // Saturante: page absurdo não pode estourar i64 nem virar offset negativo.
    pub fn offset(&self) -> i64 {
        let page = self.page.unwrap_or(1).max(1);
        page.saturating_sub(1).saturating_mul(self.limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let p = Pagination { page: None, limit: None };
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn computes_offset_from_page() {
        let p = Pagination { page: Some(3), limit: Some(20) };
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn clamps_abusive_values() {
        let p = Pagination { page: Some(0), limit: Some(10_000) };
        assert_eq!(p.limit(), 100);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn extreme_page_saturates_instead_of_overflowing() {
        let p = Pagination { page: Some(i64::MAX), limit: Some(100) };
        assert_eq!(p.offset(), i64::MAX);
        assert!(p.offset() >= 0);
    }
}
