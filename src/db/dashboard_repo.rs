// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::{error::AppError, escopo::Escopo},
    models::dashboard::{ContagemPorEstagio, ResumoDashboard},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Agregados do dashboard, todos dentro do escopo do caller.
    pub async fn resumo(&self, escopo: Escopo) -> Result<ResumoDashboard, AppError> {
        let total_clientes = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM clientes
            WHERE usuario_id = $1 AND ($2::uuid IS NULL OR empresa_id = $2)
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .fetch_one(&self.pool)
        .await?;

        let oportunidades_por_estagio = sqlx::query_as::<_, ContagemPorEstagio>(
            r#"
            SELECT estagio, COUNT(*) AS total FROM oportunidades
            WHERE usuario_id = $1 AND ($2::uuid IS NULL OR empresa_id = $2)
            GROUP BY estagio
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .fetch_all(&self.pool)
        .await?;

        let valor_em_aberto = sqlx::query_scalar::<_, Option<Decimal>>(
            r#"
            SELECT SUM(valor) FROM oportunidades
            WHERE usuario_id = $1 AND ($2::uuid IS NULL OR empresa_id = $2)
              AND estagio NOT IN ('GANHO', 'PERDIDO')
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .fetch_one(&self.pool)
        .await?
        .unwrap_or(Decimal::ZERO);

        let valor_ganho = sqlx::query_scalar::<_, Option<Decimal>>(
            r#"
            SELECT SUM(valor) FROM oportunidades
            WHERE usuario_id = $1 AND ($2::uuid IS NULL OR empresa_id = $2)
              AND estagio = 'GANHO'
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .fetch_one(&self.pool)
        .await?
        .unwrap_or(Decimal::ZERO);

        let tarefas_pendentes = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM tarefas
            WHERE usuario_id = $1 AND ($2::uuid IS NULL OR empresa_id = $2)
              AND status IN ('PENDENTE', 'EM_ANDAMENTO')
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .fetch_one(&self.pool)
        .await?;

        let tarefas_atrasadas = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM tarefas
            WHERE usuario_id = $1 AND ($2::uuid IS NULL OR empresa_id = $2)
              AND status IN ('PENDENTE', 'EM_ANDAMENTO')
              AND data_vencimento < CURRENT_DATE
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ResumoDashboard {
            total_clientes,
            oportunidades_por_estagio,
            valor_em_aberto,
            valor_ganho,
            tarefas_pendentes,
            tarefas_atrasadas,
        })
    }
}
