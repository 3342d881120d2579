// src/db/tarefa_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, escopo::Escopo},
    models::crm::{AtualizarTarefaPayload, CriarTarefaPayload, Prioridade, StatusTarefa, Tarefa},
};

#[derive(Clone)]
pub struct TarefaRepository {
    pool: PgPool,
}

impl TarefaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        escopo: Escopo,
        status: Option<StatusTarefa>,
    ) -> Result<Vec<Tarefa>, AppError> {
        let tarefas = sqlx::query_as::<_, Tarefa>(
            r#"
            SELECT * FROM tarefas
            WHERE usuario_id = $1
              AND ($2::uuid IS NULL OR empresa_id = $2)
              AND ($3::status_tarefa IS NULL OR status = $3)
            ORDER BY data_vencimento ASC NULLS LAST, created_at DESC
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(tarefas)
    }

    pub async fn find_by_id(&self, escopo: Escopo, id: Uuid) -> Result<Option<Tarefa>, AppError> {
        let tarefa = sqlx::query_as::<_, Tarefa>(
            r#"
            SELECT * FROM tarefas
            WHERE id = $1
              AND usuario_id = $2
              AND ($3::uuid IS NULL OR empresa_id = $3)
            "#,
        )
        .bind(id)
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tarefa)
    }

    pub async fn create(
        &self,
        escopo: Escopo,
        payload: &CriarTarefaPayload,
    ) -> Result<Tarefa, AppError> {
        let tarefa = sqlx::query_as::<_, Tarefa>(
            r#"
            INSERT INTO tarefas
                (usuario_id, empresa_id, cliente_id, oportunidade_id, titulo, descricao, status, prioridade, data_vencimento)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .bind(payload.cliente_id)
        .bind(payload.oportunidade_id)
        .bind(&payload.titulo)
        .bind(&payload.descricao)
        .bind(payload.status.unwrap_or(StatusTarefa::Pendente))
        .bind(payload.prioridade.unwrap_or(Prioridade::Media))
        .bind(payload.data_vencimento)
        .fetch_one(&self.pool)
        .await?;
        Ok(tarefa)
    }

    pub async fn update(
        &self,
        escopo: Escopo,
        id: Uuid,
        payload: &AtualizarTarefaPayload,
    ) -> Result<Option<Tarefa>, AppError> {
        let tarefa = sqlx::query_as::<_, Tarefa>(
            r#"
            UPDATE tarefas SET
                titulo = COALESCE($4, titulo),
                descricao = COALESCE($5, descricao),
                status = COALESCE($6, status),
                prioridade = COALESCE($7, prioridade),
                data_vencimento = COALESCE($8, data_vencimento),
                updated_at = NOW()
            WHERE id = $1
              AND usuario_id = $2
              AND ($3::uuid IS NULL OR empresa_id = $3)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .bind(&payload.titulo)
        .bind(&payload.descricao)
        .bind(payload.status)
        .bind(payload.prioridade)
        .bind(payload.data_vencimento)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tarefa)
    }

    pub async fn delete(&self, escopo: Escopo, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query(
            r#"
            DELETE FROM tarefas
            WHERE id = $1
              AND usuario_id = $2
              AND ($3::uuid IS NULL OR empresa_id = $3)
            "#,
        )
        .bind(id)
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .execute(&self.pool)
        .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
