// src/handlers/clientes.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        escopo::Escopo,
        extract::{Json, Path, Query},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::crm::{AtualizarClientePayload, Cliente, CriarClientePayload, StatusCliente},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListarClientesParams {
    pub status: Option<StatusCliente>,
    // Busca por substring em nome ou e-mail.
    pub busca: Option<String>,
}

// GET /api/clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    params(ListarClientesParams),
    responses(
        (status = 200, description = "Clientes do caller", body = Vec<Cliente>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Query(params): Query<ListarClientesParams>,
) -> Result<Json<Vec<Cliente>>, AppError> {
    let clientes = app_state
        .crm_service
        .listar_clientes(
            Escopo::do_usuario(&usuario),
            params.status,
            params.busca.as_deref(),
        )
        .await?;
    Ok(Json(clientes))
}

// GET /api/clientes/{id}
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Cliente),
        (status = 404, description = "Não existe ou não pertence ao caller")
    ),
    security(("api_jwt" = []))
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Cliente>, AppError> {
    let cliente = app_state
        .crm_service
        .buscar_cliente(Escopo::do_usuario(&usuario), id)
        .await?;
    Ok(Json(cliente))
}

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = CriarClientePayload,
    responses(
        (status = 201, description = "Cliente criado", body = Cliente),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Plano expirado")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CriarClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state
        .crm_service
        .criar_cliente(Escopo::do_usuario(&usuario), &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

// PUT /api/clientes/{id}
#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = AtualizarClientePayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Cliente),
        (status = 403, description = "Plano expirado"),
        (status = 404, description = "Não existe ou não pertence ao caller")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarClientePayload>,
) -> Result<Json<Cliente>, AppError> {
    payload.validate()?;

    let cliente = app_state
        .crm_service
        .atualizar_cliente(Escopo::do_usuario(&usuario), id, &payload)
        .await?;
    Ok(Json(cliente))
}

// DELETE /api/clientes/{id}
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 403, description = "Plano expirado"),
        (status = 404, description = "Não existe ou não pertence ao caller")
    ),
    security(("api_jwt" = []))
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state
        .crm_service
        .excluir_cliente(Escopo::do_usuario(&usuario), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
