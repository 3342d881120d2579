// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Trial ---
        handlers::trial::status,
        handlers::trial::upgrade,

        // --- Clientes ---
        handlers::clientes::listar,
        handlers::clientes::buscar,
        handlers::clientes::criar,
        handlers::clientes::atualizar,
        handlers::clientes::excluir,

        // --- Oportunidades ---
        handlers::oportunidades::listar,
        handlers::oportunidades::buscar,
        handlers::oportunidades::criar,
        handlers::oportunidades::atualizar,
        handlers::oportunidades::excluir,

        // --- Tarefas ---
        handlers::tarefas::listar,
        handlers::tarefas::buscar,
        handlers::tarefas::criar,
        handlers::tarefas::atualizar,
        handlers::tarefas::excluir,

        // --- Dashboard ---
        handlers::dashboard::resumo,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Plano,
            models::auth::StatusPlano,
            models::auth::RegisterPayload,
            models::auth::LoginPayload,
            models::auth::UsuarioResponse,
            models::auth::AuthResponse,
            handlers::trial::TrialStatusResponse,

            // --- Tenancy ---
            models::tenancy::Empresa,

            // --- CRM ---
            models::crm::StatusCliente,
            models::crm::EstagioOportunidade,
            models::crm::StatusTarefa,
            models::crm::Prioridade,
            models::crm::Cliente,
            models::crm::Oportunidade,
            models::crm::Tarefa,
            models::crm::CriarClientePayload,
            models::crm::AtualizarClientePayload,
            models::crm::CriarOportunidadePayload,
            models::crm::AtualizarOportunidadePayload,
            models::crm::CriarTarefaPayload,
            models::crm::AtualizarTarefaPayload,

            // --- Dashboard ---
            models::dashboard::ContagemPorEstagio,
            models::dashboard::ResumoDashboard,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Trial", description = "Janela de Teste e Upgrade de Plano"),
        (name = "Clientes", description = "Gestão de Clientes"),
        (name = "Oportunidades", description = "Funil de Vendas"),
        (name = "Tarefas", description = "Gestão de Tarefas"),
        (name = "Dashboard", description = "Indicadores Gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
