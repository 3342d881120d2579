// src/db/oportunidade_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, escopo::Escopo},
    models::crm::{
        AtualizarOportunidadePayload, CriarOportunidadePayload, EstagioOportunidade, Oportunidade,
        Prioridade,
    },
};

#[derive(Clone)]
pub struct OportunidadeRepository {
    pool: PgPool,
}

impl OportunidadeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        escopo: Escopo,
        estagio: Option<EstagioOportunidade>,
        cliente_id: Option<Uuid>,
    ) -> Result<Vec<Oportunidade>, AppError> {
        let oportunidades = sqlx::query_as::<_, Oportunidade>(
            r#"
            SELECT * FROM oportunidades
            WHERE usuario_id = $1
              AND ($2::uuid IS NULL OR empresa_id = $2)
              AND ($3::estagio_oportunidade IS NULL OR estagio = $3)
              AND ($4::uuid IS NULL OR cliente_id = $4)
            ORDER BY created_at DESC
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .bind(estagio)
        .bind(cliente_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(oportunidades)
    }

    pub async fn find_by_id(
        &self,
        escopo: Escopo,
        id: Uuid,
    ) -> Result<Option<Oportunidade>, AppError> {
        let oportunidade = sqlx::query_as::<_, Oportunidade>(
            r#"
            SELECT * FROM oportunidades
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
        Ok(oportunidade)
    }

    // O serviço valida o cliente referenciado antes de chegar aqui.
    pub async fn create(
        &self,
        escopo: Escopo,
        payload: &CriarOportunidadePayload,
    ) -> Result<Oportunidade, AppError> {
        let oportunidade = sqlx::query_as::<_, Oportunidade>(
            r#"
            INSERT INTO oportunidades
                (usuario_id, empresa_id, cliente_id, titulo, estagio, valor, prioridade, data_fechamento_esperada)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .bind(payload.cliente_id)
        .bind(&payload.titulo)
        .bind(payload.estagio.unwrap_or(EstagioOportunidade::Lead))
        .bind(payload.valor.unwrap_or(Decimal::ZERO))
        .bind(payload.prioridade.unwrap_or(Prioridade::Media))
        .bind(payload.data_fechamento_esperada)
        .fetch_one(&self.pool)
        .await?;
        Ok(oportunidade)
    }

    pub async fn update(
        &self,
        escopo: Escopo,
        id: Uuid,
        payload: &AtualizarOportunidadePayload,
    ) -> Result<Option<Oportunidade>, AppError> {
        let oportunidade = sqlx::query_as::<_, Oportunidade>(
            r#"
            UPDATE oportunidades SET
                titulo = COALESCE($4, titulo),
                estagio = COALESCE($5, estagio),
                valor = COALESCE($6, valor),
                prioridade = COALESCE($7, prioridade),
                data_fechamento_esperada = COALESCE($8, data_fechamento_esperada),
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
        .bind(payload.estagio)
        .bind(payload.valor)
        .bind(payload.prioridade)
        .bind(payload.data_fechamento_esperada)
        .fetch_optional(&self.pool)
        .await?;
        Ok(oportunidade)
    }

    pub async fn delete(&self, escopo: Escopo, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query(
            r#"
            DELETE FROM oportunidades
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
