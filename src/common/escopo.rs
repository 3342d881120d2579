use uuid::Uuid;

use crate::models::auth::Usuario;

/// Escopo de autorização aplicado a toda leitura e escrita de
/// clientes/oportunidades/tarefas: dono (usuário) + empresa, quando houver.
///
/// Os repositórios recebem este valor e filtram com
/// `usuario_id = $1 AND ($2::uuid IS NULL OR empresa_id = $2)`, de modo que
/// acesso entre tenants é impossível independente dos IDs enviados no payload.
#[derive(Debug, Clone, Copy)]
pub struct Escopo {
    pub usuario_id: Uuid,
    pub empresa_id: Option<Uuid>,
}

impl Escopo {
    pub fn do_usuario(usuario: &Usuario) -> Self {
        Self {
            usuario_id: usuario.id,
            empresa_id: usuario.empresa_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Plano;
    use chrono::Utc;

    fn usuario(empresa_id: Option<Uuid>) -> Usuario {
        let agora = Utc::now();
        Usuario {
            id: Uuid::new_v4(),
            nome: "Carla".into(),
            email: "carla@exemplo.com".into(),
            senha_hash: "$2b$12$hash".into(),
            empresa_id,
            plano: Plano::Trial,
            trial_inicio: agora,
            trial_fim: None,
            is_active: true,
            created_at: agora,
            updated_at: agora,
        }
    }

    #[test]
    fn escopo_carrega_dono_e_empresa_da_conta() {
        let empresa = Uuid::new_v4();
        let u = usuario(Some(empresa));
        let escopo = Escopo::do_usuario(&u);
        assert_eq!(escopo.usuario_id, u.id);
        assert_eq!(escopo.empresa_id, Some(empresa));
    }

    #[test]
    fn conta_sem_empresa_filtra_apenas_pelo_dono() {
        let u = usuario(None);
        let escopo = Escopo::do_usuario(&u);
        assert_eq!(escopo.usuario_id, u.id);
        assert!(escopo.empresa_id.is_none());
    }
}
