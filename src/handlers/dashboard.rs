// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::{error::AppError, escopo::Escopo},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::dashboard::ResumoDashboard,
};

// GET /api/dashboard/resumo
#[utoipa::path(
    get,
    path = "/api/dashboard/resumo",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Agregados do funil e das tarefas", body = ResumoDashboard)
    ),
    security(("api_jwt" = []))
)]
pub async fn resumo(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<Json<ResumoDashboard>, AppError> {
    let resumo = app_state
        .dashboard_repo
        .resumo(Escopo::do_usuario(&usuario))
        .await?;
    Ok(Json(resumo))
}
