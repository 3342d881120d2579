// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::{auth::auth_guard, trial::trial_gate};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // /me só precisa do token válido
    let me_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Trial fica fora do trial_gate de propósito: conta expirada precisa
    // conseguir consultar o status e fazer upgrade.
    let trial_routes = Router::new()
        .route("/status", get(handlers::trial::status))
        .route("/upgrade", post(handlers::trial::upgrade))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Recursos de CRM: auth_guard roda primeiro, depois o trial_gate.
    // (camadas são aplicadas de fora para dentro na ordem inversa dos .layer)
    let clientes_routes = Router::new()
        .route(
            "/",
            get(handlers::clientes::listar).post(handlers::clientes::criar),
        )
        .route(
            "/{id}",
            get(handlers::clientes::buscar)
                .put(handlers::clientes::atualizar)
                .delete(handlers::clientes::excluir),
        );

    let oportunidades_routes = Router::new()
        .route(
            "/",
            get(handlers::oportunidades::listar).post(handlers::oportunidades::criar),
        )
        .route(
            "/{id}",
            get(handlers::oportunidades::buscar)
                .put(handlers::oportunidades::atualizar)
                .delete(handlers::oportunidades::excluir),
        );

    let tarefas_routes = Router::new()
        .route(
            "/",
            get(handlers::tarefas::listar).post(handlers::tarefas::criar),
        )
        .route(
            "/{id}",
            get(handlers::tarefas::buscar)
                .put(handlers::tarefas::atualizar)
                .delete(handlers::tarefas::excluir),
        );

    let dashboard_routes = Router::new().route("/resumo", get(handlers::dashboard::resumo));

    let recursos = Router::new()
        .nest("/clientes", clientes_routes)
        .nest("/oportunidades", oportunidades_routes)
        .nest("/tarefas", tarefas_routes)
        .nest("/dashboard", dashboard_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            trial_gate,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/docs/openapi.json",
            get(|| async { Json(docs::ApiDoc::openapi()) }),
        )
        .nest("/api/auth", auth_routes.merge(me_routes))
        .nest("/api/trial", trial_routes)
        .nest("/api", recursos)
        .with_state(app_state);

    let porta = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{porta}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
