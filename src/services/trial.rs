// src/services/trial.rs

use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Plano, StatusPlano, Usuario},
};

const SEGUNDOS_POR_DIA: i64 = 86_400;

/// Gate de trial/assinatura. Reavaliado a cada requisição autenticada; o
/// resultado nunca é cacheado.
#[derive(Clone)]
pub struct TrialService {
    user_repo: UserRepository,
}

impl TrialService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Calcula a situação do plano e, quando um trial acabou de vencer,
    /// persiste o downgrade na mesma requisição. O UPDATE é idempotente,
    /// então duas requisições simultâneas do mesmo usuário não corrompem nada.
    pub async fn avaliar(&self, usuario: &Usuario) -> Result<StatusPlano, AppError> {
        let status = avaliar_janela(usuario, Utc::now());
        if usuario.plano == Plano::Trial && status.plano == Plano::Expired {
            self.user_repo.expirar_trial(usuario.id).await?;
            tracing::info!(usuario = %usuario.id, "Trial vencido, conta rebaixada para EXPIRED");
        }
        Ok(status)
    }

    pub async fn upgrade(&self, usuario_id: uuid::Uuid) -> Result<Usuario, AppError> {
        self.user_repo.upgrade_para_premium(usuario_id).await
    }
}

/// Janela de trial como função pura de (plano, janela, agora).
///
/// Regras:
/// - PREMIUM nunca expira sozinho; `is_active = false` não muda isso — a
///   expiração é dirigida pelo estado do plano, não pela flag.
/// - TRIAL expira estritamente depois de `trial_fim_efetivo()`.
/// - Dias restantes são arredondados para cima (meio dia conta como 1).
pub fn avaliar_janela(usuario: &Usuario, agora: DateTime<Utc>) -> StatusPlano {
    match usuario.plano {
        Plano::Premium => StatusPlano {
            plano: Plano::Premium,
            dias_restantes: 0,
            is_trial_expired: false,
        },
        Plano::Expired => StatusPlano {
            plano: Plano::Expired,
            dias_restantes: 0,
            is_trial_expired: true,
        },
        Plano::Trial => {
            let fim = usuario.trial_fim_efetivo();
            if agora > fim {
                StatusPlano {
                    plano: Plano::Expired,
                    dias_restantes: 0,
                    is_trial_expired: true,
                }
            } else {
                let restante = (fim - agora).num_seconds();
                StatusPlano {
                    plano: Plano::Trial,
                    dias_restantes: (restante + SEGUNDOS_POR_DIA - 1) / SEGUNDOS_POR_DIA,
                    is_trial_expired: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn usuario(plano: Plano, trial_fim: Option<DateTime<Utc>>) -> Usuario {
        let inicio = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        Usuario {
            id: Uuid::new_v4(),
            nome: "Bruno".into(),
            email: "bruno@exemplo.com".into(),
            senha_hash: "$2b$12$hash".into(),
            empresa_id: None,
            plano,
            trial_inicio: inicio,
            trial_fim,
            is_active: true,
            created_at: inicio,
            updated_at: inicio,
        }
    }

    #[test]
    fn trial_dentro_da_janela_informa_dias_restantes() {
        let u = usuario(Plano::Trial, None);
        // 3 dias depois do início: restam 4 dos 7 dias padrão.
        let agora = u.trial_inicio + Duration::days(3);
        let status = avaliar_janela(&u, agora);
        assert_eq!(status.plano, Plano::Trial);
        assert_eq!(status.dias_restantes, 4);
        assert!(!status.is_trial_expired);
    }

    #[test]
    fn fracao_de_dia_arredonda_para_cima() {
        let u = usuario(Plano::Trial, None);
        let agora = u.trial_inicio + Duration::days(6) + Duration::hours(12);
        let status = avaliar_janela(&u, agora);
        assert_eq!(status.dias_restantes, 1);
        assert!(!status.is_trial_expired);
    }

    #[test]
    fn trial_vencido_vira_expired() {
        let fim = Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap();
        let u = usuario(Plano::Trial, Some(fim));
        let status = avaliar_janela(&u, fim + Duration::days(1));
        assert_eq!(status.plano, Plano::Expired);
        assert_eq!(status.dias_restantes, 0);
        assert!(status.is_trial_expired);
    }

    #[test]
    fn no_instante_exato_do_fim_ainda_nao_expirou() {
        let fim = Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap();
        let u = usuario(Plano::Trial, Some(fim));
        let status = avaliar_janela(&u, fim);
        assert_eq!(status.plano, Plano::Trial);
        assert!(!status.is_trial_expired);
    }

    #[test]
    fn janela_padrao_de_7_dias_vale_sem_trial_fim_gravado() {
        let u = usuario(Plano::Trial, None);
        let status = avaliar_janela(&u, u.trial_inicio + Duration::days(8));
        assert_eq!(status.plano, Plano::Expired);
        assert!(status.is_trial_expired);
    }

    #[test]
    fn premium_nunca_expira_sozinho() {
        let u = usuario(Plano::Premium, None);
        let status = avaliar_janela(&u, u.trial_inicio + Duration::days(365));
        assert_eq!(status.plano, Plano::Premium);
        assert!(!status.is_trial_expired);
    }

    #[test]
    fn premium_desativado_nao_conta_como_expirado() {
        // A expiração é dirigida pelo plano; a flag de ativação não bloqueia.
        let mut u = usuario(Plano::Premium, None);
        u.is_active = false;
        let status = avaliar_janela(&u, u.trial_inicio + Duration::days(30));
        assert_eq!(status.plano, Plano::Premium);
        assert!(!status.is_trial_expired);
    }

    #[test]
    fn conta_ja_expirada_continua_expirada() {
        let u = usuario(Plano::Expired, None);
        let status = avaliar_janela(&u, u.trial_inicio);
        assert_eq!(status.plano, Plano::Expired);
        assert!(status.is_trial_expired);
    }
}
