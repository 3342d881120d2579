pub mod cliente_repo;
pub mod dashboard_repo;
pub mod empresa_repo;
pub mod oportunidade_repo;
pub mod tarefa_repo;
pub mod user_repo;

pub use cliente_repo::ClienteRepository;
pub use dashboard_repo::DashboardRepository;
pub use empresa_repo::EmpresaRepository;
pub use oportunidade_repo::OportunidadeRepository;
pub use tarefa_repo::TarefaRepository;
pub use user_repo::UserRepository;
