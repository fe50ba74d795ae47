use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::change_password,

        // --- Notices ---
        handlers::notices::create_notice,
        handlers::notices::list_notices,
        handlers::notices::get_notice,
        handlers::notices::update_notice,
        handlers::notices::delete_notice,

        // --- Applications ---
        handlers::applications::create_application,
        handlers::applications::list_my_applications,
        handlers::applications::list_all_applications,
        handlers::applications::get_application,
        handlers::applications::update_application,
        handlers::applications::submit_application,

        // --- Evaluators ---
        handlers::evaluators::create_evaluator,
        handlers::evaluators::list_evaluators,
        handlers::evaluators::get_evaluator,
        handlers::evaluators::update_evaluator,
        handlers::evaluators::toggle_evaluator_status,
        handlers::evaluators::delete_evaluator,

        // --- Cities ---
        handlers::cities::list_cities,
        handlers::cities::get_city,

        // --- Entities ---
        handlers::entities::create_entity,
        handlers::entities::list_entities,
        handlers::entities::get_entity,
        handlers::entities::update_entity,

        // --- Groups ---
        handlers::groups::create_group,
        handlers::groups::list_my_groups,
        handlers::groups::get_group,
        handlers::groups::update_group,
        handlers::groups::delete_group,
        handlers::groups::add_group_member,
        handlers::groups::change_group_member_role,
        handlers::groups::remove_group_member,

        // --- Profiles & Portals ---
        handlers::profiles::get_my_profile,
        handlers::profiles::upsert_my_profile,
        handlers::profiles::get_profile,
        handlers::profiles::create_portal,
        handlers::profiles::get_portal,
        handlers::profiles::update_portal,
        handlers::profiles::delete_portal,

        // --- Evaluations (ponto de extensão) ---
        handlers::evaluations::create_evaluation,
        handlers::evaluations::list_pending_evaluations,
        handlers::evaluations::decide_evaluation,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::ChangePasswordPayload,
            models::auth::AuthResponse,

            // --- Notices ---
            models::notice::NoticeStatus,
            models::notice::Notice,
            models::notice::EvaluationCriterion,
            models::notice::CreateNoticePayload,
            models::notice::UpdateNoticePayload,

            // --- Applications ---
            models::application::ApplicationStatus,
            models::application::Application,
            models::application::EvaluationRecord,
            models::application::CreateApplicationPayload,
            models::application::UpdateApplicationPayload,

            // --- Evaluators ---
            models::evaluator::Evaluator,
            models::evaluator::CreateEvaluatorPayload,
            models::evaluator::UpdateEvaluatorPayload,

            // --- Cities ---
            models::city::City,

            // --- Entities ---
            models::entity::EntityStatus,
            models::entity::Entity,
            models::entity::CulturalCouncil,
            models::entity::CulturalFund,
            models::entity::CreateEntityPayload,
            models::entity::UpdateEntityPayload,

            // --- Groups ---
            models::group::GroupMemberRole,
            models::group::CulturalGroup,
            models::group::GroupMember,
            models::group::GroupDetail,
            models::group::CreateGroupPayload,
            models::group::UpdateGroupPayload,
            models::group::AddMemberPayload,
            models::group::ChangeMemberRolePayload,

            // --- Profiles & Portals ---
            models::profile::AgentProfile,
            models::profile::UpsertProfilePayload,
            models::profile::EntityPortal,
            models::profile::CreatePortalPayload,
            models::profile::UpdatePortalPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e registro"),
        (name = "Notices", description = "Editais de fomento cultural"),
        (name = "Applications", description = "Inscrições dos agentes culturais"),
        (name = "Evaluators", description = "Pareceristas"),
        (name = "Cities", description = "Municípios (dados de referência)"),
        (name = "Entities", description = "Entes federados"),
        (name = "Groups", description = "Coletivos culturais"),
        (name = "Profiles", description = "Perfis de agente cultural"),
        (name = "Portals", description = "Portais dos entes federados"),
        (name = "Evaluations", description = "Fluxo de avaliação (não implementado)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
