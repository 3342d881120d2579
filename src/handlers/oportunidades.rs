// src/handlers/oportunidades.rs

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
    models::crm::{
        AtualizarOportunidadePayload, CriarOportunidadePayload, EstagioOportunidade, Oportunidade,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListarOportunidadesParams {
    pub estagio: Option<EstagioOportunidade>,
    pub cliente_id: Option<Uuid>,
}

// GET /api/oportunidades
#[utoipa::path(
    get,
    path = "/api/oportunidades",
    tag = "Oportunidades",
    params(ListarOportunidadesParams),
    responses(
        (status = 200, description = "Oportunidades do caller", body = Vec<Oportunidade>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Query(params): Query<ListarOportunidadesParams>,
) -> Result<Json<Vec<Oportunidade>>, AppError> {
    let oportunidades = app_state
        .crm_service
        .listar_oportunidades(
            Escopo::do_usuario(&usuario),
            params.estagio,
            params.cliente_id,
        )
        .await?;
    Ok(Json(oportunidades))
}

// GET /api/oportunidades/{id}
#[utoipa::path(
    get,
    path = "/api/oportunidades/{id}",
    tag = "Oportunidades",
    params(("id" = Uuid, Path, description = "ID da oportunidade")),
    responses(
        (status = 200, description = "Oportunidade encontrada", body = Oportunidade),
        (status = 404, description = "Não existe ou não pertence ao caller")
    ),
    security(("api_jwt" = []))
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Oportunidade>, AppError> {
    let oportunidade = app_state
        .crm_service
        .buscar_oportunidade(Escopo::do_usuario(&usuario), id)
        .await?;
    Ok(Json(oportunidade))
}

// POST /api/oportunidades
#[utoipa::path(
    post,
    path = "/api/oportunidades",
    tag = "Oportunidades",
    request_body = CriarOportunidadePayload,
    responses(
        (status = 201, description = "Oportunidade criada", body = Oportunidade),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Plano expirado"),
        (status = 404, description = "Cliente referenciado fora do escopo do caller")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CriarOportunidadePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let oportunidade = app_state
        .crm_service
        .criar_oportunidade(Escopo::do_usuario(&usuario), &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(oportunidade)))
}

// PUT /api/oportunidades/{id}
#[utoipa::path(
    put,
    path = "/api/oportunidades/{id}",
    tag = "Oportunidades",
    params(("id" = Uuid, Path, description = "ID da oportunidade")),
    request_body = AtualizarOportunidadePayload,
    responses(
        (status = 200, description = "Oportunidade atualizada", body = Oportunidade),
        (status = 403, description = "Plano expirado"),
        (status = 404, description = "Não existe ou não pertence ao caller")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarOportunidadePayload>,
) -> Result<Json<Oportunidade>, AppError> {
    payload.validate()?;

    let oportunidade = app_state
        .crm_service
        .atualizar_oportunidade(Escopo::do_usuario(&usuario), id, &payload)
        .await?;
    Ok(Json(oportunidade))
}

// DELETE /api/oportunidades/{id}
#[utoipa::path(
    delete,
    path = "/api/oportunidades/{id}",
    tag = "Oportunidades",
    params(("id" = Uuid, Path, description = "ID da oportunidade")),
    responses(
        (status = 204, description = "Oportunidade removida"),
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
        .excluir_oportunidade(Escopo::do_usuario(&usuario), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
