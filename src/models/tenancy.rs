// src/models/tenancy.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// A empresa é o tenant: criada (opcionalmente) no registro e usada como
// segundo eixo de filtragem em todos os recursos.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Empresa {
    pub id: Uuid,
    pub nome: String,
    pub created_at: DateTime<Utc>,
}
