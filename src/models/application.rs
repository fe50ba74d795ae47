use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;

// Máquina de estados da inscrição:
// draft -> submitted -> evaluation -> approved | rejected.
// Apenas draft -> submitted é alcançável pela API; o fluxo de avaliação é um
// ponto de extensão (rotas respondem 501).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Draft,
    Submitted,
    Evaluation,
    Approved,
    Rejected,
}

// Inscrição de um agente cultural em um edital.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub notice_id: Uuid,
    pub user_id: Uuid,
    pub project_name: String,
    pub project_description: Option<String>,
    pub requested_amount: Decimal,
    pub status: ApplicationStatus,
    pub form_data: Value,
    pub documents: Value,
    // Lista de pareceres embutidos (ver `EvaluationRecord`)
    pub evaluations: Value,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Só rascunhos podem ser editados ou enviados.
    pub fn ensure_draft(&self) -> Result<(), AppError> {
        if self.status != ApplicationStatus::Draft {
            return Err(AppError::BadRequest(
                "Apenas inscrições em rascunho podem ser editadas".into(),
            ));
        }
        Ok(())
    }
}

// Parecer registrado por um parecerista sobre a inscrição.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    pub evaluator_id: Uuid,
    /// Nota por critério, na ordem declarada no edital
    pub scores: Vec<Decimal>,
    pub total_score: Decimal,
    pub comments: Option<String>,
    pub evaluated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    pub notice_id: Uuid,

    #[validate(length(min = 3, message = "O nome do projeto deve ter no mínimo 3 caracteres."))]
    pub project_name: String,

    pub project_description: Option<String>,
    pub requested_amount: Decimal,
    pub form_data: Option<Value>,
    pub documents: Option<Value>,
}

// Patch explícito da inscrição; status nunca entra por aqui — a transição
// draft -> submitted tem endpoint próprio.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationPayload {
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub requested_amount: Option<Decimal>,
    pub form_data: Option<Value>,
    pub documents: Option<Value>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub notice_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_application(status: ApplicationStatus) -> Application {
        let now = Utc::now();
        Application {
            id: Uuid::new_v4(),
            notice_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            project_name: "Sarau do Bairro".into(),
            project_description: None,
            requested_amount: dec!(3000),
            status,
            form_data: Value::Object(Default::default()),
            documents: Value::Array(vec![]),
            evaluations: Value::Array(vec![]),
            submitted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn only_draft_can_be_edited() {
        assert!(sample_application(ApplicationStatus::Draft).ensure_draft().is_ok());

        for status in [
            ApplicationStatus::Submitted,
            ApplicationStatus::Evaluation,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            let err = sample_application(status).ensure_draft().unwrap_err();
            match err {
                AppError::BadRequest(msg) => {
                    assert_eq!(msg, "Apenas inscrições em rascunho podem ser editadas")
                }
                other => panic!("esperava BadRequest, veio {other:?}"),
            }
        }
    }
}
