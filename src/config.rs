// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ClienteRepository, DashboardRepository, EmpresaRepository, OportunidadeRepository,
        TarefaRepository, UserRepository,
    },
    services::{auth::AuthService, crm::CrmService, trial::TrialService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub trial_service: TrialService,
    pub crm_service: CrmService,
    pub dashboard_repo: DashboardRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Única retentativa do sistema: a conexão inicial com o banco insiste
        // a cada 5 segundos até conseguir.
        let db_pool = loop {
            match PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(3))
                .connect(&database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) => {
                    tracing::error!("Falha ao conectar ao banco de dados: {e}. Tentando novamente em 5s...");
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
            }
        };
        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let empresa_repo = EmpresaRepository::new(db_pool.clone());
        let auth_service = AuthService::new(
            user_repo.clone(),
            empresa_repo,
            jwt_secret,
            db_pool.clone(),
        );
        let trial_service = TrialService::new(user_repo);
        let crm_service = CrmService::new(
            ClienteRepository::new(db_pool.clone()),
            OportunidadeRepository::new(db_pool.clone()),
            TarefaRepository::new(db_pool.clone()),
        );
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        Ok(Self {
            db_pool,
            auth_service,
            trial_service,
            crm_service,
            dashboard_repo,
        })
    }
}
