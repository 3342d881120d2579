pub mod auth;
pub mod clientes;
pub mod dashboard;
pub mod oportunidades;
pub mod tarefas;
pub mod trial;
