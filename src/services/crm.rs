// src/services/crm.rs

use uuid::Uuid;

use crate::{
    common::{error::AppError, escopo::Escopo},
    db::{ClienteRepository, OportunidadeRepository, TarefaRepository},
    models::crm::{
        AtualizarClientePayload, AtualizarOportunidadePayload, AtualizarTarefaPayload, Cliente,
        CriarClientePayload, CriarOportunidadePayload, CriarTarefaPayload, EstagioOportunidade,
        Oportunidade, StatusCliente, StatusTarefa, Tarefa,
    },
};

// Orquestra os repositórios de CRM. As regras que cruzam entidades (validar
// referências dentro do escopo do caller) moram aqui, não nos handlers.
#[derive(Clone)]
pub struct CrmService {
    clientes: ClienteRepository,
    oportunidades: OportunidadeRepository,
    tarefas: TarefaRepository,
}

impl CrmService {
    pub fn new(
        clientes: ClienteRepository,
        oportunidades: OportunidadeRepository,
        tarefas: TarefaRepository,
    ) -> Self {
        Self {
            clientes,
            oportunidades,
            tarefas,
        }
    }

    // --- Clientes ---

    pub async fn listar_clientes(
        &self,
        escopo: Escopo,
        status: Option<StatusCliente>,
        busca: Option<&str>,
    ) -> Result<Vec<Cliente>, AppError> {
        self.clientes.list(escopo, status, busca).await
    }

    pub async fn buscar_cliente(&self, escopo: Escopo, id: Uuid) -> Result<Cliente, AppError> {
        self.clientes
            .find_by_id(escopo, id)
            .await?
            .ok_or(AppError::NaoEncontrado)
    }

    pub async fn criar_cliente(
        &self,
        escopo: Escopo,
        payload: &CriarClientePayload,
    ) -> Result<Cliente, AppError> {
        self.clientes.create(escopo, payload).await
    }

    pub async fn atualizar_cliente(
        &self,
        escopo: Escopo,
        id: Uuid,
        payload: &AtualizarClientePayload,
    ) -> Result<Cliente, AppError> {
        self.clientes
            .update(escopo, id, payload)
            .await?
            .ok_or(AppError::NaoEncontrado)
    }

    pub async fn excluir_cliente(&self, escopo: Escopo, id: Uuid) -> Result<(), AppError> {
        if self.clientes.delete(escopo, id).await? {
            Ok(())
        } else {
            Err(AppError::NaoEncontrado)
        }
    }

    // --- Oportunidades ---

    pub async fn listar_oportunidades(
        &self,
        escopo: Escopo,
        estagio: Option<EstagioOportunidade>,
        cliente_id: Option<Uuid>,
    ) -> Result<Vec<Oportunidade>, AppError> {
        self.oportunidades.list(escopo, estagio, cliente_id).await
    }

    pub async fn buscar_oportunidade(
        &self,
        escopo: Escopo,
        id: Uuid,
    ) -> Result<Oportunidade, AppError> {
        self.oportunidades
            .find_by_id(escopo, id)
            .await?
            .ok_or(AppError::NaoEncontrado)
    }

    /// O cliente referenciado precisa passar pelo mesmo filtro de dono +
    /// empresa antes da oportunidade nascer. Cliente de outro tenant é
    /// indistinguível de cliente inexistente: 404.
    pub async fn criar_oportunidade(
        &self,
        escopo: Escopo,
        payload: &CriarOportunidadePayload,
    ) -> Result<Oportunidade, AppError> {
        self.clientes
            .find_by_id(escopo, payload.cliente_id)
            .await?
            .ok_or(AppError::NaoEncontrado)?;

        self.oportunidades.create(escopo, payload).await
    }

    pub async fn atualizar_oportunidade(
        &self,
        escopo: Escopo,
        id: Uuid,
        payload: &AtualizarOportunidadePayload,
    ) -> Result<Oportunidade, AppError> {
        self.oportunidades
            .update(escopo, id, payload)
            .await?
            .ok_or(AppError::NaoEncontrado)
    }

    pub async fn excluir_oportunidade(&self, escopo: Escopo, id: Uuid) -> Result<(), AppError> {
        if self.oportunidades.delete(escopo, id).await? {
            Ok(())
        } else {
            Err(AppError::NaoEncontrado)
        }
    }

    // --- Tarefas ---

    pub async fn listar_tarefas(
        &self,
        escopo: Escopo,
        status: Option<StatusTarefa>,
    ) -> Result<Vec<Tarefa>, AppError> {
        self.tarefas.list(escopo, status).await
    }

    pub async fn buscar_tarefa(&self, escopo: Escopo, id: Uuid) -> Result<Tarefa, AppError> {
        self.tarefas
            .find_by_id(escopo, id)
            .await?
            .ok_or(AppError::NaoEncontrado)
    }

    // Mesma regra da oportunidade para as referências opcionais da tarefa.
    pub async fn criar_tarefa(
        &self,
        escopo: Escopo,
        payload: &CriarTarefaPayload,
    ) -> Result<Tarefa, AppError> {
        if let Some(cliente_id) = payload.cliente_id {
            self.clientes
                .find_by_id(escopo, cliente_id)
                .await?
                .ok_or(AppError::NaoEncontrado)?;
        }
        if let Some(oportunidade_id) = payload.oportunidade_id {
            self.oportunidades
                .find_by_id(escopo, oportunidade_id)
                .await?
                .ok_or(AppError::NaoEncontrado)?;
        }

        self.tarefas.create(escopo, payload).await
    }

    pub async fn atualizar_tarefa(
        &self,
        escopo: Escopo,
        id: Uuid,
        payload: &AtualizarTarefaPayload,
    ) -> Result<Tarefa, AppError> {
        self.tarefas
            .update(escopo, id, payload)
            .await?
            .ok_or(AppError::NaoEncontrado)
    }

    pub async fn excluir_tarefa(&self, escopo: Escopo, id: Uuid) -> Result<(), AppError> {
        if self.tarefas.delete(escopo, id).await? {
            Ok(())
        } else {
            Err(AppError::NaoEncontrado)
        }
    }
}
