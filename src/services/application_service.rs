use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    db::{ApplicationRepository, NoticeRepository},
    models::{
        application::{
            Application, ApplicationFilter, CreateApplicationPayload, UpdateApplicationPayload,
        },
        auth::{User, UserRole},
        notice::NoticeStatus,
    },
};

#[derive(Clone)]
pub struct ApplicationService {
    application_repo: ApplicationRepository,
    notice_repo: NoticeRepository,
}

impl ApplicationService {
    pub fn new(application_repo: ApplicationRepository, notice_repo: NoticeRepository) -> Self {
        Self {
            application_repo,
            notice_repo,
        }
    }

    /// Criação: só agentes, só em edital publicado e dentro da janela.
    /// Nasce como rascunho; a unicidade (agente, edital) é constraint do banco.
    pub async fn create(
        &self,
        user: &User,
        payload: &CreateApplicationPayload,
    ) -> Result<Application, AppError> {
        if user.role != UserRole::Agent {
            return Err(AppError::Forbidden(
                "Apenas agentes culturais podem se inscrever em editais.".into(),
            ));
        }

        let notice = self
            .notice_repo
            .find_by_id(payload.notice_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Edital não encontrado.".into()))?;

        if notice.status != NoticeStatus::Published {
            return Err(AppError::BadRequest(
                "Este edital não está aberto para inscrições.".into(),
            ));
        }

        let now = Utc::now();
        if !notice.accepts_applications_at(now) {
            return Err(AppError::BadRequest(
                "Fora do período de inscrições deste edital.".into(),
            ));
        }

        notice.validate_requested_amount(payload.requested_amount)?;

        self.application_repo.create(user.id, payload).await
    }

    /// Edição: só o dono (ou admin), só em rascunho. Se o patch mexe no valor,
    /// os limites do edital valem de novo.
    pub async fn update(
        &self,
        user: &User,
        id: Uuid,
        patch: &UpdateApplicationPayload,
    ) -> Result<Application, AppError> {
        let application = self.find_owned(user, id).await?;
        application.ensure_draft()?;

        if let Some(amount) = patch.requested_amount {
            let notice = self
                .notice_repo
                .find_by_id(application.notice_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Edital não encontrado.".into()))?;
            notice.validate_requested_amount(amount)?;
        }

        self.application_repo.update(id, patch).await
    }

    /// draft -> submitted. Única transição exposta pela API.
    pub async fn submit(&self, user: &User, id: Uuid) -> Result<Application, AppError> {
        let application = self.find_owned(user, id).await?;
        application.ensure_draft()?;

        let notice = self
            .notice_repo
            .find_by_id(application.notice_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Edital não encontrado.".into()))?;

        let now = Utc::now();
        if notice.submission_window_closed(now) {
            return Err(AppError::BadRequest(
                "O período de inscrições deste edital já se encerrou.".into(),
            ));
        }

        self.application_repo.submit(id, now).await
    }

    pub async fn get(&self, user: &User, id: Uuid) -> Result<Application, AppError> {
        self.find_owned(user, id).await
    }

    pub async fn list_mine(
        &self,
        user: &User,
        filter: &ApplicationFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Application>, AppError> {
        self.application_repo
            .list(Some(user.id), filter, pagination.limit(), pagination.offset())
            .await
    }

    pub async fn list_all(
        &self,
        user: &User,
        filter: &ApplicationFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Application>, AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Apenas administradores podem listar todas as inscrições.".into(),
            ));
        }
        self.application_repo
            .list(None, filter, pagination.limit(), pagination.offset())
            .await
    }

    /// Carrega a inscrição e aplica a regra de posse: dono ou admin.
    async fn find_owned(&self, user: &User, id: Uuid) -> Result<Application, AppError> {
        let application = self
            .application_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inscrição não encontrada.".into()))?;

        if application.user_id != user.id && !user.is_admin() {
            return Err(AppError::Forbidden(
                "Você não tem acesso a esta inscrição.".into(),
            ));
        }
        Ok(application)
    }
}
