// src/handlers/tarefas.rs

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
    models::crm::{AtualizarTarefaPayload, CriarTarefaPayload, StatusTarefa, Tarefa},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListarTarefasParams {
    pub status: Option<StatusTarefa>,
}

// GET /api/tarefas
#[utoipa::path(
    get,
    path = "/api/tarefas",
    tag = "Tarefas",
    params(ListarTarefasParams),
    responses(
        (status = 200, description = "Tarefas do caller", body = Vec<Tarefa>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Query(params): Query<ListarTarefasParams>,
) -> Result<Json<Vec<Tarefa>>, AppError> {
    let tarefas = app_state
        .crm_service
        .listar_tarefas(Escopo::do_usuario(&usuario), params.status)
        .await?;
    Ok(Json(tarefas))
}

// GET /api/tarefas/{id}
#[utoipa::path(
    get,
    path = "/api/tarefas/{id}",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Tarefa encontrada", body = Tarefa),
        (status = 404, description = "Não existe ou não pertence ao caller")
    ),
    security(("api_jwt" = []))
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Tarefa>, AppError> {
    let tarefa = app_state
        .crm_service
        .buscar_tarefa(Escopo::do_usuario(&usuario), id)
        .await?;
    Ok(Json(tarefa))
}

// POST /api/tarefas
#[utoipa::path(
    post,
    path = "/api/tarefas",
    tag = "Tarefas",
    request_body = CriarTarefaPayload,
    responses(
        (status = 201, description = "Tarefa criada", body = Tarefa),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Plano expirado"),
        (status = 404, description = "Referência fora do escopo do caller")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CriarTarefaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tarefa = app_state
        .crm_service
        .criar_tarefa(Escopo::do_usuario(&usuario), &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(tarefa)))
}

// PUT /api/tarefas/{id}
#[utoipa::path(
    put,
    path = "/api/tarefas/{id}",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    request_body = AtualizarTarefaPayload,
    responses(
        (status = 200, description = "Tarefa atualizada", body = Tarefa),
        (status = 403, description = "Plano expirado"),
        (status = 404, description = "Não existe ou não pertence ao caller")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarTarefaPayload>,
) -> Result<Json<Tarefa>, AppError> {
    payload.validate()?;

    let tarefa = app_state
        .crm_service
        .atualizar_tarefa(Escopo::do_usuario(&usuario), id, &payload)
        .await?;
    Ok(Json(tarefa))
}

// DELETE /api/tarefas/{id}
#[utoipa::path(
    delete,
    path = "/api/tarefas/{id}",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 204, description = "Tarefa removida"),
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
        .excluir_tarefa(Escopo::do_usuario(&usuario), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
