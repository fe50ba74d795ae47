use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    Draft,
    Published,
    Closed,
    Canceled,
}

// Edital: chamada pública de fomento cultural.
// Critérios, cotas, acessibilidade, etapas e orçamento são JSONB — o
// formulário do frontend evolui sem migração de esquema.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub entity_id: Uuid,
    pub city_id: Option<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_value: Decimal,
    pub min_application_value: Decimal,
    pub max_application_value: Decimal,
    pub status: NoticeStatus,
    pub categories: Vec<String>,
    pub requirements: Value,
    pub documents: Value,
    pub evaluation_criteria: Value,
    pub quotas: Value,
    pub accessibility: Value,
    pub stages: Value,
    pub habilitation_documents: Value,
    pub budget: Value,
    pub appeal_period_days: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notice {
    /// Janela de inscrição aberta no instante dado.
    pub fn accepts_applications_at(&self, now: DateTime<Utc>) -> bool {
        self.status == NoticeStatus::Published && now >= self.start_date && now <= self.end_date
    }

    /// Envio barrado após o encerramento, mesmo com a inscrição em rascunho.
    pub fn submission_window_closed(&self, now: DateTime<Utc>) -> bool {
        now > self.end_date
    }

    /// Valor solicitado dentro dos limites do edital. Vale tanto na criação
    /// quanto em qualquer atualização que mexa no valor.
    pub fn validate_requested_amount(&self, amount: Decimal) -> Result<(), AppError> {
        if amount < self.min_application_value || amount > self.max_application_value {
            return Err(AppError::BadRequest(format!(
                "O valor solicitado deve estar entre {} e {}.",
                self.min_application_value, self.max_application_value
            )));
        }
        Ok(())
    }
}

// Critério de avaliação declarado no edital.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationCriterion {
    pub name: String,
    pub weight: i32,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticePayload {
    #[validate(length(min = 3, message = "O título deve ter no mínimo 3 caracteres."))]
    pub title: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    pub entity_id: Uuid,
    pub city_id: Option<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_value: Decimal,
    pub min_application_value: Decimal,
    pub max_application_value: Decimal,
    pub status: Option<NoticeStatus>,
    pub categories: Option<Vec<String>>,
    pub requirements: Option<Value>,
    pub documents: Option<Value>,
    pub evaluation_criteria: Option<Vec<EvaluationCriterion>>,
    pub quotas: Option<Value>,
    pub accessibility: Option<Value>,
    pub stages: Option<Value>,
    pub habilitation_documents: Option<Value>,
    pub budget: Option<Value>,
    pub appeal_period_days: Option<i32>,
}

// Patch explícito: só os campos listados aqui podem ser alterados.
// As transições publish/close passam pelo campo `status` deste patch.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoticePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub city_id: Option<Uuid>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub total_value: Option<Decimal>,
    pub min_application_value: Option<Decimal>,
    pub max_application_value: Option<Decimal>,
    pub status: Option<NoticeStatus>,
    pub categories: Option<Vec<String>>,
    pub requirements: Option<Value>,
    pub documents: Option<Value>,
    pub evaluation_criteria: Option<Vec<EvaluationCriterion>>,
    pub quotas: Option<Value>,
    pub accessibility: Option<Value>,
    pub stages: Option<Value>,
    pub habilitation_documents: Option<Value>,
    pub budget: Option<Value>,
    pub appeal_period_days: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct NoticeFilter {
    /// Quando omitido, a listagem pública considera apenas editais publicados.
    pub status: Option<NoticeStatus>,
    pub category: Option<String>,
    pub entity_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub start_after: Option<DateTime<Utc>>,
    pub end_before: Option<DateTime<Utc>>,
    /// Busca textual em título e descrição.
    pub search: Option<String>,
}

/// `end_date` estritamente depois de `start_date`, e limites de valor
/// coerentes. Roda na criação e sobre o resultado de qualquer patch.
pub fn validate_notice_window(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    min_value: Decimal,
    max_value: Decimal,
) -> Result<(), AppError> {
    if end_date <= start_date {
        return Err(AppError::BadRequest(
            "A data de encerramento deve ser posterior à data de abertura.".into(),
        ));
    }
    if min_value > max_value {
        return Err(AppError::BadRequest(
            "O valor mínimo por inscrição não pode exceder o valor máximo.".into(),
        ));
    }
    if min_value < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Os valores do edital não podem ser negativos.".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn sample_notice(status: NoticeStatus) -> Notice {
        let now = Utc::now();
        Notice {
            id: Uuid::new_v4(),
            title: "Edital de Cultura Popular".into(),
            description: "Fomento a projetos culturais".into(),
            entity_id: Uuid::new_v4(),
            city_id: None,
            start_date: now - Duration::days(5),
            end_date: now + Duration::days(5),
            total_value: dec!(100000),
            min_application_value: dec!(1000),
            max_application_value: dec!(5000),
            status,
            categories: vec![],
            requirements: Value::Array(vec![]),
            documents: Value::Array(vec![]),
            evaluation_criteria: Value::Array(vec![]),
            quotas: Value::Object(Default::default()),
            accessibility: Value::Object(Default::default()),
            stages: Value::Array(vec![]),
            habilitation_documents: Value::Array(vec![]),
            budget: Value::Object(Default::default()),
            appeal_period_days: 3,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn window_rejects_end_before_start() {
        let now = Utc::now();
        let err = validate_notice_window(now, now, dec!(1000), dec!(5000));
        assert!(err.is_err());
        let err = validate_notice_window(now, now - Duration::days(1), dec!(1000), dec!(5000));
        assert!(err.is_err());
    }

    #[test]
    fn window_rejects_min_above_max() {
        let now = Utc::now();
        assert!(validate_notice_window(now, now + Duration::days(1), dec!(6000), dec!(5000)).is_err());
    }

    #[test]
    fn amount_bounds_are_inclusive() {
        let notice = sample_notice(NoticeStatus::Published);
        assert!(notice.validate_requested_amount(dec!(1000)).is_ok());
        assert!(notice.validate_requested_amount(dec!(5000)).is_ok());
        assert!(notice.validate_requested_amount(dec!(3000)).is_ok());
        assert!(notice.validate_requested_amount(dec!(999.99)).is_err());
        assert!(notice.validate_requested_amount(dec!(5000.01)).is_err());
    }

    #[test]
    fn draft_notice_does_not_accept_applications() {
        let notice = sample_notice(NoticeStatus::Draft);
        assert!(!notice.accepts_applications_at(Utc::now()));
    }

    #[test]
    fn published_notice_respects_date_window() {
        let mut notice = sample_notice(NoticeStatus::Published);
        assert!(notice.accepts_applications_at(Utc::now()));

        notice.end_date = Utc::now() - Duration::days(1);
        assert!(!notice.accepts_applications_at(Utc::now()));
    }

    #[test]
    fn submission_closes_after_end_date_even_for_drafts() {
        let mut notice = sample_notice(NoticeStatus::Published);
        assert!(!notice.submission_window_closed(Utc::now()));

        notice.end_date = Utc::now() - Duration::seconds(1);
        assert!(notice.submission_window_closed(Utc::now()));
    }
}
