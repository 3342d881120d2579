use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Taxonomia de erros da API. Todo handler devolve `Result<_, AppError>` e a
// conversão para HTTP acontece em um único lugar, no `IntoResponse` abaixo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Rejeições dos extratores: corpo/query/id que nem chegam a desserializar.
    #[error("Payload inválido: {0}")]
    PayloadInvalido(String),

    #[error("E-mail já existe")]
    EmailJaExiste,

    #[error("Credenciais inválidas")]
    CredenciaisInvalidas,

    #[error("Token inválido")]
    TokenInvalido,

    #[error("Plano expirado")]
    PlanoExpirado,

    #[error("Recurso não encontrado")]
    NaoEncontrado,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::PayloadInvalido(_)
            | AppError::EmailJaExiste => StatusCode::BAD_REQUEST,
            AppError::CredenciaisInvalidas | AppError::TokenInvalido => StatusCode::UNAUTHORIZED,
            AppError::PlanoExpirado => StatusCode::FORBIDDEN,
            AppError::NaoEncontrado => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::ValidationError(errors) => {
                // O contrato da API é sempre `{message}`, então os detalhes
                // por campo viram uma única string legível.
                let mut campos: Vec<String> = Vec::new();
                for (campo, erros) in errors.field_errors() {
                    let msgs: Vec<String> = erros
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    if msgs.is_empty() {
                        campos.push(campo.to_string());
                    } else {
                        campos.push(format!("{}: {}", campo, msgs.join(", ")));
                    }
                }
                format!("Um ou mais campos são inválidos. {}", campos.join("; "))
            }
            AppError::PayloadInvalido(detalhe) => {
                format!("Requisição malformada: {detalhe}")
            }
            AppError::EmailJaExiste => "Este e-mail já está em uso.".to_string(),
            AppError::CredenciaisInvalidas => "E-mail ou senha incorretos.".to_string(),
            AppError::TokenInvalido => {
                "Token de autenticação inválido ou ausente.".to_string()
            }
            AppError::PlanoExpirado => {
                "Seu período de teste expirou. Faça upgrade para continuar.".to_string()
            }
            AppError::NaoEncontrado => "Recurso não encontrado.".to_string(),

            // DatabaseError, InternalServerError, Bcrypt e JWT viram 500.
            // O detalhe vai para o log, nunca para o cliente.
            e => {
                tracing::error!("Erro interno do servidor: {e}");
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "message": message }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapeia_status_http_por_variante() {
        assert_eq!(AppError::EmailJaExiste.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::PayloadInvalido("campo ausente".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::CredenciaisInvalidas.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::TokenInvalido.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::PlanoExpirado.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NaoEncontrado.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn resposta_carrega_o_status_da_variante() {
        let resposta = AppError::NaoEncontrado.into_response();
        assert_eq!(resposta.status(), StatusCode::NOT_FOUND);

        let resposta = AppError::PlanoExpirado.into_response();
        assert_eq!(resposta.status(), StatusCode::FORBIDDEN);
    }
}
