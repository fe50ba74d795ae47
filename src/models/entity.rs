use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "entity_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    Pending,
    Approved,
    Rejected,
}

// Ente federado (municipal/estadual/federal) dono dos editais.
// Os blocos de representante, conselho e fundo são sub-documentos JSONB.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: Uuid,
    pub cpf_cnpj: String,
    pub name: String,
    pub entity_type: String,
    pub city_id: Option<Uuid>,
    pub address: Option<Value>,
    pub legal_representative: Option<Value>,
    pub technical_representative: Option<Value>,
    pub cultural_council: Option<Value>,
    pub cultural_fund: Option<Value>,
    pub bank_info: Option<Value>,
    pub required_documents: Option<Value>,
    pub status: EntityStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Conselho cultural: referência de lei e datas de mandato.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CulturalCouncil {
    pub law_number: Option<String>,
    pub last_election_date: Option<NaiveDate>,
    pub term_end_date: Option<NaiveDate>,
}

// Fundo cultural: lei de criação e vigência do plano de cultura.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CulturalFund {
    pub law_number: Option<String>,
    pub plan_start_date: Option<NaiveDate>,
    pub plan_end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntityPayload {
    #[validate(length(min = 14, max = 14, message = "CNPJ inválido."))]
    pub cpf_cnpj: String,

    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: String,

    /// municipal, state ou federal
    pub entity_type: Option<String>,
    pub city_id: Option<Uuid>,
    pub address: Option<Value>,
    pub legal_representative: Option<Value>,
    pub technical_representative: Option<Value>,
    pub cultural_council: Option<CulturalCouncil>,
    pub cultural_fund: Option<CulturalFund>,
    pub bank_info: Option<Value>,
    pub required_documents: Option<Value>,
}

// Patch explícito para atualização (sem merge permissivo de campos).
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntityPayload {
    pub name: Option<String>,
    pub entity_type: Option<String>,
    pub city_id: Option<Uuid>,
    pub address: Option<Value>,
    pub legal_representative: Option<Value>,
    pub technical_representative: Option<Value>,
    pub cultural_council: Option<CulturalCouncil>,
    pub cultural_fund: Option<CulturalFund>,
    pub bank_info: Option<Value>,
    pub required_documents: Option<Value>,
    pub status: Option<EntityStatus>,
    pub is_active: Option<bool>,
}

/// Invariantes de datas do conselho e do plano de cultura.
pub fn validate_council(council: &CulturalCouncil, today: NaiveDate) -> Result<(), AppError> {
    if let Some(election) = council.last_election_date {
        if election > today {
            return Err(AppError::BadRequest(
                "A data da última eleição do conselho não pode estar no futuro.".into(),
            ));
        }
        if let Some(term_end) = council.term_end_date {
            if term_end <= election {
                return Err(AppError::BadRequest(
                    "O fim do mandato do conselho deve ser posterior à última eleição.".into(),
                ));
            }
        }
    }
    Ok(())
}

pub fn validate_fund(fund: &CulturalFund) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (fund.plan_start_date, fund.plan_end_date) {
        if start >= end {
            return Err(AppError::BadRequest(
                "O início do plano de cultura deve anteceder o seu fim.".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_election_in_the_future() {
        let council = CulturalCouncil {
            law_number: None,
            last_election_date: Some(date(2030, 1, 1)),
            term_end_date: None,
        };
        assert!(validate_council(&council, date(2026, 8, 26)).is_err());
    }

    #[test]
    fn rejects_term_ending_before_election() {
        let council = CulturalCouncil {
            law_number: None,
            last_election_date: Some(date(2024, 5, 10)),
            term_end_date: Some(date(2024, 5, 10)),
        };
        assert!(validate_council(&council, date(2026, 8, 26)).is_err());
    }

    #[test]
    fn accepts_valid_council_dates() {
        let council = CulturalCouncil {
            law_number: Some("Lei 123/2020".into()),
            last_election_date: Some(date(2024, 5, 10)),
            term_end_date: Some(date(2028, 5, 10)),
        };
        assert!(validate_council(&council, date(2026, 8, 26)).is_ok());
    }

    #[test]
    fn rejects_inverted_plan_window() {
        let fund = CulturalFund {
            law_number: None,
            plan_start_date: Some(date(2026, 1, 1)),
            plan_end_date: Some(date(2025, 1, 1)),
        };
        assert!(validate_fund(&fund).is_err());
    }
}
