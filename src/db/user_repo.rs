// src/db/user_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::Usuario};

// O repositório de usuários, responsável por todas as interações com a tabela 'usuarios'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    // Cria um novo usuário. Aceita um executor para participar da transação
    // que também cria a empresa no registro.
    pub async fn create_usuario<'e, E>(
        &self,
        executor: E,
        nome: &str,
        email: &str,
        senha_hash: &str,
        empresa_id: Option<Uuid>,
        trial_fim: DateTime<Utc>,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (nome, email, senha_hash, empresa_id, trial_fim)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(email)
        .bind(senha_hash)
        .bind(empresa_id)
        .bind(trial_fim)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Converte violação da chave única de e-mail em erro de negócio
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailJaExiste;
                }
            }
            e.into()
        })
    }

    /// Transição TRIAL -> EXPIRED. Idempotente: o WHERE por `plano = 'TRIAL'`
    /// faz requisições concorrentes gravarem os mesmos valores terminais.
    pub async fn expirar_trial(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE usuarios
            SET plano = 'EXPIRED', is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND plano = 'TRIAL'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // Upgrade manual para PREMIUM; reativa a conta.
    pub async fn upgrade_para_premium(&self, id: Uuid) -> Result<Usuario, AppError> {
        sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuarios
            SET plano = 'PREMIUM', is_active = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NaoEncontrado)
    }
}
