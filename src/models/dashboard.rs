// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::crm::EstagioOportunidade;

// Linha do agrupamento por estágio do funil.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContagemPorEstagio {
    pub estagio: EstagioOportunidade,
    pub total: i64,
}

/// Agregados do dashboard, sempre calculados dentro do escopo do caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDashboard {
    pub total_clientes: i64,
    pub oportunidades_por_estagio: Vec<ContagemPorEstagio>,
    pub valor_em_aberto: Decimal,
    pub valor_ganho: Decimal,
    pub tarefas_pendentes: i64,
    pub tarefas_atrasadas: i64,
}
