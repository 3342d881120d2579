// src/models/crm.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---
// Cada um mapeia um CREATE TYPE do banco; o JSON usa os mesmos nomes.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_cliente", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusCliente {
    Ativo,
    Inativo,
    Lead,
    Cliente,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "estagio_oportunidade", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EstagioOportunidade {
    Lead,
    Qualificado,
    Proposta,
    Negociacao,
    // Clientes antigos ainda mandam "FECHADO" para o estágio ganho.
    #[serde(alias = "FECHADO")]
    Ganho,
    Perdido,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_tarefa", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusTarefa {
    Pendente,
    // Idem: "EM_PROGRESSO" é a grafia antiga.
    #[serde(alias = "EM_PROGRESSO")]
    EmAndamento,
    Concluida,
    Cancelada,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "prioridade", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Prioridade {
    Baixa,
    Media,
    Alta,
}

// --- REGISTROS ---
// `usuario_id`/`empresa_id` são sempre forçados a partir do caller; nenhum
// payload de entrada carrega esses campos.

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub empresa_id: Option<Uuid>,

    pub nome: String,
    pub email: Option<String>,
    pub telefone: Option<String>,

    pub status: StatusCliente,
    pub origem: Option<String>,
    pub tags: Vec<String>,
    pub observacoes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Oportunidade {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub empresa_id: Option<Uuid>,
    pub cliente_id: Uuid,

    pub titulo: String,
    // Transições livres: qualquer estágio pode ir para qualquer outro.
    pub estagio: EstagioOportunidade,
    pub valor: Decimal,
    pub prioridade: Prioridade,
    pub data_fechamento_esperada: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tarefa {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub empresa_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
    pub oportunidade_id: Option<Uuid>,

    pub titulo: String,
    pub descricao: Option<String>,
    pub status: StatusTarefa,
    pub prioridade: Prioridade,
    pub data_vencimento: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarClientePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub status: Option<StatusCliente>,
    pub origem: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub observacoes: Option<String>,
}

// Atualização parcial: campo ausente mantém o valor atual.
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarClientePayload {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub nome: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub status: Option<StatusCliente>,
    pub origem: Option<String>,
    pub tags: Option<Vec<String>>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarOportunidadePayload {
    pub cliente_id: Uuid,
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub titulo: String,
    pub estagio: Option<EstagioOportunidade>,
    pub valor: Option<Decimal>,
    pub prioridade: Option<Prioridade>,
    pub data_fechamento_esperada: Option<NaiveDate>,
}

// `cliente_id` é imutável depois da criação.
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarOportunidadePayload {
    #[validate(length(min = 1, message = "O título não pode ficar vazio."))]
    pub titulo: Option<String>,
    pub estagio: Option<EstagioOportunidade>,
    pub valor: Option<Decimal>,
    pub prioridade: Option<Prioridade>,
    pub data_fechamento_esperada: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarTarefaPayload {
    pub cliente_id: Option<Uuid>,
    pub oportunidade_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub titulo: String,
    pub descricao: Option<String>,
    pub status: Option<StatusTarefa>,
    pub prioridade: Option<Prioridade>,
    pub data_vencimento: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarTarefaPayload {
    #[validate(length(min = 1, message = "O título não pode ficar vazio."))]
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub status: Option<StatusTarefa>,
    pub prioridade: Option<Prioridade>,
    pub data_vencimento: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_de_cliente_ignora_campos_de_dono() {
        // IDs de dono/tenant enviados no corpo não existem no payload tipado.
        let json = serde_json::json!({
            "nome": "Loja Azul",
            "usuarioId": "7f8e2a9e-53a1-4a7c-bb1d-111111111111",
            "empresaId": "7f8e2a9e-53a1-4a7c-bb1d-222222222222",
            "tags": ["vip"]
        });
        let payload: CriarClientePayload = serde_json::from_value(json).unwrap();
        assert_eq!(payload.nome, "Loja Azul");
        assert_eq!(payload.tags, vec!["vip".to_string()]);
    }

    #[test]
    fn estagio_aceita_a_grafia_antiga_fechado() {
        let estagio: EstagioOportunidade = serde_json::from_str("\"FECHADO\"").unwrap();
        assert_eq!(estagio, EstagioOportunidade::Ganho);
        // Na saída, só a grafia canônica existe.
        assert_eq!(serde_json::to_string(&estagio).unwrap(), "\"GANHO\"");
    }

    #[test]
    fn status_de_tarefa_aceita_em_progresso() {
        let status: StatusTarefa = serde_json::from_str("\"EM_PROGRESSO\"").unwrap();
        assert_eq!(status, StatusTarefa::EmAndamento);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"EM_ANDAMENTO\"");
    }

    #[test]
    fn enums_seguem_a_grafia_do_banco() {
        assert_eq!(
            serde_json::to_string(&StatusCliente::Ativo).unwrap(),
            "\"ATIVO\""
        );
        assert_eq!(
            serde_json::to_string(&Prioridade::Media).unwrap(),
            "\"MEDIA\""
        );
        assert_eq!(
            serde_json::to_string(&StatusTarefa::Concluida).unwrap(),
            "\"CONCLUIDA\""
        );
    }
}
