//! Núcleo de ciclo de vida e controle de acesso do sistema de inscrições
//! em eventos: deriva o status temporal e a cor de exibição de um evento,
//! resolve o que cada usuário pode fazer e valida os vínculos de técnicos
//! com as modalidades das suas escolas.

// Declaração dos nossos módulos
pub mod common;
pub mod config;
pub mod models;
pub mod services;
pub mod store;

// Importações principais
pub use common::error::AppError;
pub use config::AppState;
