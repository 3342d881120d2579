// src/middleware/trial.rs

use axum::{extract::State, http::Method, middleware::Next, response::Response};

use crate::{common::error::AppError, config::AppState, models::auth::Usuario};

/// Gate de plano, aplicado depois do `auth_guard` em toda rota de recurso.
///
/// Reavalia a janela de trial a cada requisição (um trial que venceu é
/// rebaixado aqui mesmo, no caminho de leitura), anexa o `StatusPlano`
/// resultante às extensions e devolve 403 para verbos mutantes quando o
/// estado efetivo é EXPIRED. Leituras continuam permitidas.
pub async fn trial_gate(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let usuario = request
        .extensions()
        .get::<Usuario>()
        .cloned()
        .ok_or(AppError::TokenInvalido)?;

    let status = app_state.trial_service.avaliar(&usuario).await?;

    let metodo = request.method();
    let mutante = metodo == Method::POST
        || metodo == Method::PUT
        || metodo == Method::PATCH
        || metodo == Method::DELETE;

    if status.is_trial_expired && mutante {
        return Err(AppError::PlanoExpirado);
    }

    request.extensions_mut().insert(status);
    Ok(next.run(request).await)
}
