// src/handlers/trial.rs

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::UsuarioResponse,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct TrialStatusResponse {
    pub usuario: UsuarioResponse,
}

// GET /api/trial/status
#[utoipa::path(
    get,
    path = "/api/trial/status",
    tag = "Trial",
    responses(
        (status = 200, description = "Situação atual do plano", body = TrialStatusResponse),
        (status = 401, description = "Token inválido ou ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn status(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<Json<TrialStatusResponse>, AppError> {
    // Mesma avaliação do gate: um trial vencido é rebaixado nesta chamada.
    let status = app_state.trial_service.avaliar(&usuario).await?;
    Ok(Json(TrialStatusResponse {
        usuario: UsuarioResponse::montar(&usuario, &status),
    }))
}

// POST /api/trial/upgrade
// Fica atrás do auth_guard, sem o trial_gate: conta expirada precisa
// conseguir fazer upgrade.
#[utoipa::path(
    post,
    path = "/api/trial/upgrade",
    tag = "Trial",
    responses(
        (status = 200, description = "Plano atualizado para PREMIUM", body = TrialStatusResponse),
        (status = 401, description = "Token inválido ou ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn upgrade(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<Json<TrialStatusResponse>, AppError> {
    let atualizado = app_state.trial_service.upgrade(usuario.id).await?;
    let status = app_state.trial_service.avaliar(&atualizado).await?;
    Ok(Json(TrialStatusResponse {
        usuario: UsuarioResponse::montar(&atualizado, &status),
    }))
}
