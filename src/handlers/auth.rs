// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::Json},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginPayload, RegisterPayload, UsuarioResponse},
};

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Conta criada (e empresa, se informada)", body = AuthResponse),
        (status = 400, description = "Campos inválidos ou e-mail já em uso")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (usuario, token) = app_state
        .auth_service
        .register_usuario(
            &payload.nome,
            &payload.email,
            &payload.senha,
            payload.empresa_nome.as_deref(),
        )
        .await?;

    let status = app_state.trial_service.avaliar(&usuario).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            usuario: UsuarioResponse::montar(&usuario, &status),
            token,
        }),
    ))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Autenticado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let (usuario, token) = app_state
        .auth_service
        .login_usuario(&payload.email, &payload.senha)
        .await?;

    // O gate roda aqui também: um trial que venceu é rebaixado no próprio
    // login e a resposta já sai com isTrialExpired=true.
    let status = app_state.trial_service.avaliar(&usuario).await?;

    Ok(Json(AuthResponse {
        usuario: UsuarioResponse::montar(&usuario, &status),
        token,
    }))
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Perfil do usuário autenticado", body = UsuarioResponse),
        (status = 401, description = "Token inválido ou ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<Json<UsuarioResponse>, AppError> {
    let status = app_state.trial_service.avaliar(&usuario).await?;
    Ok(Json(UsuarioResponse::montar(&usuario, &status)))
}
