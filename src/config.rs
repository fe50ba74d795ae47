use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ApplicationRepository, CityRepository, EntityRepository, EvaluatorRepository,
        GroupRepository, NoticeRepository, ProfileRepository, UserRepository,
    },
    services::{
        application_service::ApplicationService, auth::AuthService, entity_service::EntityService,
        evaluator_service::EvaluatorService, group_service::GroupService,
        notice_service::NoticeService, profile_service::ProfileService,
    },
};

// O estado compartilhado acessível em toda a aplicação.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub notice_service: NoticeService,
    pub application_service: ApplicationService,
    pub evaluator_service: EvaluatorService,
    pub entity_service: EntityService,
    pub group_service: GroupService,
    pub profile_service: ProfileService,
    pub city_repo: CityRepository,
    pub frontend_url: Option<String>,
    pub port: u16,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let jwt_expires_hours = env::var("JWT_EXPIRES_IN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);
        let frontend_url = env::var("FRONTEND_URL").ok();
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o grafo de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let city_repo = CityRepository::new(db_pool.clone());
        let entity_repo = EntityRepository::new(db_pool.clone());
        let notice_repo = NoticeRepository::new(db_pool.clone());
        let application_repo = ApplicationRepository::new(db_pool.clone());
        let evaluator_repo = EvaluatorRepository::new(db_pool.clone());
        let group_repo = GroupRepository::new(db_pool.clone());
        let profile_repo = ProfileRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret, jwt_expires_hours);
        let notice_service = NoticeService::new(notice_repo.clone(), entity_repo.clone());
        let application_service = ApplicationService::new(application_repo, notice_repo);
        let evaluator_service =
            EvaluatorService::new(evaluator_repo, user_repo.clone(), db_pool.clone());
        let entity_service = EntityService::new(entity_repo.clone());
        let group_service = GroupService::new(group_repo, db_pool.clone());
        let profile_service = ProfileService::new(profile_repo, entity_repo);

        Ok(Self {
            db_pool,
            auth_service,
            notice_service,
            application_service,
            evaluator_service,
            entity_service,
            group_service,
            profile_service,
            city_repo,
            frontend_url,
            port,
        })
    }
}
