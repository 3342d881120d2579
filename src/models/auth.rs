// src/models/auth.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Duração padrão do período de teste quando `trial_fim` não foi gravado.
pub const TRIAL_DIAS: i64 = 7;

// Estado de plano da conta. Gravado como enum nativo no Postgres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "plano_conta", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Plano {
    Trial,
    Premium,
    Expired,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    pub nome: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub senha_hash: String,

    pub empresa_id: Option<Uuid>,

    pub plano: Plano,
    pub trial_inicio: DateTime<Utc>,
    pub trial_fim: Option<DateTime<Utc>>,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Usuario {
    /// Fim efetivo do trial: o valor gravado, ou `trial_inicio + 7 dias`.
    pub fn trial_fim_efetivo(&self) -> DateTime<Utc> {
        self.trial_fim
            .unwrap_or(self.trial_inicio + Duration::days(TRIAL_DIAS))
    }
}

/// Situação do plano calculada pelo gate a cada requisição autenticada.
/// Viaja nas extensions da requisição e nas respostas de auth/trial.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusPlano {
    pub plano: Plano,
    pub dias_restantes: i64,
    pub is_trial_expired: bool,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub nome: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: String,
    // Quando presente, cria a empresa (tenant) junto com a conta.
    pub empresa_nome: Option<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub senha: String,
}

/// Perfil devolvido por register/login/trial: o usuário sem o hash, mais os
/// campos derivados do gate (`diasRestantes`, `isTrialExpired`).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioResponse {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub empresa_id: Option<Uuid>,
    pub plano: Plano,
    pub trial_inicio: DateTime<Utc>,
    pub trial_fim: DateTime<Utc>,
    pub dias_restantes: i64,
    pub is_trial_expired: bool,
}

impl UsuarioResponse {
    pub fn montar(usuario: &Usuario, status: &StatusPlano) -> Self {
        Self {
            id: usuario.id,
            nome: usuario.nome.clone(),
            email: usuario.email.clone(),
            empresa_id: usuario.empresa_id,
            plano: status.plano,
            trial_inicio: usuario.trial_inicio,
            trial_fim: usuario.trial_fim_efetivo(),
            dias_restantes: status.dias_restantes,
            is_trial_expired: status.is_trial_expired,
        }
    }
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub usuario: UsuarioResponse,
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn usuario_base() -> Usuario {
        let inicio = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        Usuario {
            id: Uuid::new_v4(),
            nome: "Ana".into(),
            email: "ana@exemplo.com".into(),
            senha_hash: "$2b$12$hash".into(),
            empresa_id: None,
            plano: Plano::Trial,
            trial_inicio: inicio,
            trial_fim: None,
            is_active: true,
            created_at: inicio,
            updated_at: inicio,
        }
    }

    #[test]
    fn trial_fim_efetivo_usa_padrao_de_7_dias() {
        let usuario = usuario_base();
        assert_eq!(
            usuario.trial_fim_efetivo(),
            usuario.trial_inicio + Duration::days(7)
        );
    }

    #[test]
    fn trial_fim_explicito_tem_prioridade() {
        let mut usuario = usuario_base();
        let fim = usuario.trial_inicio + Duration::days(30);
        usuario.trial_fim = Some(fim);
        assert_eq!(usuario.trial_fim_efetivo(), fim);
    }

    #[test]
    fn usuario_nunca_serializa_o_hash_da_senha() {
        let usuario = usuario_base();
        let json = serde_json::to_value(&usuario).unwrap();
        assert!(json.get("senhaHash").is_none());
        assert!(json.get("senha_hash").is_none());
        assert_eq!(json["email"], "ana@exemplo.com");
    }

    #[test]
    fn resposta_do_usuario_sai_em_camel_case() {
        let usuario = usuario_base();
        let status = StatusPlano {
            plano: Plano::Trial,
            dias_restantes: 5,
            is_trial_expired: false,
        };
        let json = serde_json::to_value(UsuarioResponse::montar(&usuario, &status)).unwrap();
        assert_eq!(json["diasRestantes"], 5);
        assert_eq!(json["isTrialExpired"], false);
        assert_eq!(json["plano"], "TRIAL");
        assert!(json.get("trialFim").is_some());
    }
}
