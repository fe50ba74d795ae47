use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Aplica as migrações do banco na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_public = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let auth_protected = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/password", put(handlers::auth::change_password))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Editais: leitura pública, escrita de admin
    let notices_public = Router::new()
        .route("/", get(handlers::notices::list_notices))
        .route("/{id}", get(handlers::notices::get_notice));

    let notices_protected = Router::new()
        .route("/", post(handlers::notices::create_notice))
        .route(
            "/{id}",
            put(handlers::notices::update_notice).delete(handlers::notices::delete_notice),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Inscrições: tudo autenticado
    let application_routes = Router::new()
        .route(
            "/",
            post(handlers::applications::create_application)
                .get(handlers::applications::list_all_applications),
        )
        .route(
            "/my-applications",
            get(handlers::applications::list_my_applications),
        )
        .route(
            "/{id}",
            get(handlers::applications::get_application)
                .put(handlers::applications::update_application),
        )
        .route(
            "/{id}/submit",
            patch(handlers::applications::submit_application),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Pareceristas: leitura pública, escrita de admin
    let evaluators_public = Router::new()
        .route("/", get(handlers::evaluators::list_evaluators))
        .route("/{id}", get(handlers::evaluators::get_evaluator));

    let evaluators_protected = Router::new()
        .route("/", post(handlers::evaluators::create_evaluator))
        .route(
            "/{id}",
            put(handlers::evaluators::update_evaluator)
                .delete(handlers::evaluators::delete_evaluator),
        )
        .route(
            "/{id}/status",
            patch(handlers::evaluators::toggle_evaluator_status),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Municípios: dado de referência público
    let city_routes = Router::new()
        .route("/", get(handlers::cities::list_cities))
        .route("/{id}", get(handlers::cities::get_city));

    // Entes federados: leitura pública, escrita de admin
    let entities_public = Router::new()
        .route("/", get(handlers::entities::list_entities))
        .route("/{id}", get(handlers::entities::get_entity));

    let entities_protected = Router::new()
        .route("/", post(handlers::entities::create_entity))
        .route("/{id}", put(handlers::entities::update_entity))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Coletivos culturais: tudo autenticado
    let group_routes = Router::new()
        .route("/", post(handlers::groups::create_group))
        .route("/my-groups", get(handlers::groups::list_my_groups))
        .route(
            "/{id}",
            get(handlers::groups::get_group)
                .put(handlers::groups::update_group)
                .delete(handlers::groups::delete_group),
        )
        .route("/{id}/members", post(handlers::groups::add_group_member))
        .route(
            "/{id}/members/{user_id}",
            patch(handlers::groups::change_group_member_role)
                .delete(handlers::groups::remove_group_member),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Perfis: /me autenticado, consulta pública por usuário
    let profiles_public = Router::new().route("/{user_id}", get(handlers::profiles::get_profile));

    let profiles_protected = Router::new()
        .route(
            "/me",
            get(handlers::profiles::get_my_profile).put(handlers::profiles::upsert_my_profile),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Portais: leitura pública, escrita de admin
    let portals_public = Router::new().route("/{entity_id}", get(handlers::profiles::get_portal));

    let portals_protected = Router::new()
        .route("/", post(handlers::profiles::create_portal))
        .route(
            "/{id}",
            put(handlers::profiles::update_portal).delete(handlers::profiles::delete_portal),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Fluxo de avaliação: ponto de extensão, responde 501
    let evaluation_routes = Router::new()
        .route("/", post(handlers::evaluations::create_evaluation))
        .route(
            "/pending",
            get(handlers::evaluations::list_pending_evaluations),
        )
        .route(
            "/{id}/decision",
            patch(handlers::evaluations::decide_evaluation),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let cors = match &app_state.frontend_url {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .expect("FRONTEND_URL inválida"),
            )
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_public.clone().merge(auth_protected))
        // Mount legado usado por versões antigas do frontend
        .nest("/auth", auth_public)
        .nest("/api/notices", notices_public.merge(notices_protected))
        .nest("/api/applications", application_routes)
        .nest("/api/evaluators", evaluators_public.merge(evaluators_protected))
        .nest("/api/cities", city_routes)
        .nest("/api/entities", entities_public.merge(entities_protected))
        .nest("/api/groups", group_routes)
        .nest("/api/profiles", profiles_public.merge(profiles_protected))
        .nest("/api/portals", portals_public.merge(portals_protected))
        .nest("/api/evaluations", evaluation_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state.clone());

    let addr = format!("0.0.0.0:{}", app_state.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!(
        "🚀 Servidor escutando em {}",
        listener.local_addr().expect("endereço local")
    );
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
