// src/db/empresa_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::tenancy::Empresa};

#[derive(Clone)]
pub struct EmpresaRepository {
    pool: PgPool,
}

impl EmpresaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Cria a empresa (tenant). Usada dentro da transação de registro.
    pub async fn create_empresa<'e, E>(
        &self,
        executor: E,
        nome: &str,
    ) -> Result<Empresa, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let empresa = sqlx::query_as::<_, Empresa>(
            "INSERT INTO empresas (nome) VALUES ($1) RETURNING *",
        )
        .bind(nome)
        .fetch_one(executor)
        .await?;
        Ok(empresa)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Empresa>, AppError> {
        let empresa = sqlx::query_as::<_, Empresa>("SELECT * FROM empresas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(empresa)
    }
}
