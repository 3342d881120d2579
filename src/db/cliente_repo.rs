// src/db/cliente_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, escopo::Escopo},
    models::crm::{AtualizarClientePayload, Cliente, CriarClientePayload, StatusCliente},
};

// Curingas digitados na busca (`%`, `_` e o próprio `\`) são tratados como
// texto literal, não como padrão do ILIKE.
fn escapar_ilike(busca: &str) -> String {
    busca
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        escopo: Escopo,
        status: Option<StatusCliente>,
        busca: Option<&str>,
    ) -> Result<Vec<Cliente>, AppError> {
        let busca = busca.map(escapar_ilike);
        let clientes = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT * FROM clientes
            WHERE usuario_id = $1
              AND ($2::uuid IS NULL OR empresa_id = $2)
              AND ($3::status_cliente IS NULL OR status = $3)
              AND ($4::text IS NULL OR nome ILIKE '%' || $4 || '%' OR email ILIKE '%' || $4 || '%')
            ORDER BY created_at DESC
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .bind(status)
        .bind(busca)
        .fetch_all(&self.pool)
        .await?;
        Ok(clientes)
    }

    pub async fn find_by_id(&self, escopo: Escopo, id: Uuid) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT * FROM clientes
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
        Ok(cliente)
    }

    // Dono e empresa vêm sempre do escopo, nunca do payload.
    pub async fn create(
        &self,
        escopo: Escopo,
        payload: &CriarClientePayload,
    ) -> Result<Cliente, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (usuario_id, empresa_id, nome, email, telefone, status, origem, tags, observacoes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(escopo.usuario_id)
        .bind(escopo.empresa_id)
        .bind(&payload.nome)
        .bind(&payload.email)
        .bind(&payload.telefone)
        .bind(payload.status.unwrap_or(StatusCliente::Lead))
        .bind(&payload.origem)
        .bind(&payload.tags)
        .bind(&payload.observacoes)
        .fetch_one(&self.pool)
        .await?;
        Ok(cliente)
    }

    // UPDATE já filtrado pelo escopo: zero linhas significa "não existe ou
    // não é seu", e o chamador responde 404 nos dois casos.
    pub async fn update(
        &self,
        escopo: Escopo,
        id: Uuid,
        payload: &AtualizarClientePayload,
    ) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes SET
                nome = COALESCE($4, nome),
                email = COALESCE($5, email),
                telefone = COALESCE($6, telefone),
                status = COALESCE($7, status),
                origem = COALESCE($8, origem),
                tags = COALESCE($9, tags),
                observacoes = COALESCE($10, observacoes),
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
        .bind(&payload.nome)
        .bind(&payload.email)
        .bind(&payload.telefone)
        .bind(payload.status)
        .bind(&payload.origem)
        .bind(&payload.tags)
        .bind(&payload.observacoes)
        .fetch_optional(&self.pool)
        .await?;
        Ok(cliente)
    }

    pub async fn delete(&self, escopo: Escopo, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query(
            r#"
            DELETE FROM clientes
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busca_trata_curingas_como_texto_literal() {
        assert_eq!(escapar_ilike("%"), "\\%");
        assert_eq!(escapar_ilike("a_b"), "a\\_b");
        assert_eq!(escapar_ilike("c\\d"), "c\\\\d");
        assert_eq!(escapar_ilike("maria"), "maria");
    }

    #[test]
    fn escape_do_proprio_escape_vem_primeiro() {
        // "\%" digitado vira "\\\%": barra literal seguida de % literal.
        assert_eq!(escapar_ilike("\\%"), "\\\\\\%");
    }
}
