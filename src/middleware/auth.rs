// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::auth::Usuario};

/// Autentica a requisição: valida o Bearer token, resolve a conta e a insere
/// nas extensions para os handlers.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let usuario = app_state.auth_service.validate_token(token).await?;

            request.extensions_mut().insert(usuario);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::TokenInvalido)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub Usuario);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Usuario>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::TokenInvalido)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Plano;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use uuid::Uuid;

    fn usuario() -> Usuario {
        let agora = Utc::now();
        Usuario {
            id: Uuid::new_v4(),
            nome: "Diego".into(),
            email: "diego@exemplo.com".into(),
            senha_hash: "$2b$12$hash".into(),
            empresa_id: Some(Uuid::new_v4()),
            plano: Plano::Trial,
            trial_inicio: agora,
            trial_fim: None,
            is_active: true,
            created_at: agora,
            updated_at: agora,
        }
    }

    #[tokio::test]
    async fn sem_conta_nas_extensions_rejeita_com_401() {
        let (mut parts, _) = Request::builder()
            .uri("/api/clientes")
            .body(())
            .unwrap()
            .into_parts();

        let erro = AuthenticatedUser::from_request_parts(&mut parts, &())
            .await
            .err()
            .expect("sem usuário resolvido o extrator deveria rejeitar");
        assert_eq!(erro.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn com_conta_nas_extensions_extrai_o_usuario() {
        let u = usuario();
        let (mut parts, _) = Request::builder()
            .uri("/api/clientes")
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(u.clone());

        let AuthenticatedUser(extraido) = AuthenticatedUser::from_request_parts(&mut parts, &())
            .await
            .expect("usuário presente deveria extrair");
        assert_eq!(extraido.id, u.id);
        assert_eq!(extraido.empresa_id, u.empresa_id);
    }
}
