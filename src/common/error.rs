use thiserror::Error;

use crate::store::kv::StoreError;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Toda falha aqui é um resultado esperado de entrada inválida ou estado
// desatualizado; não existe classe de erro fatal neste núcleo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Escola não encontrada")]
    SchoolNotFound,

    #[error("Vínculo de técnico não encontrado")]
    TechnicianLinkNotFound,

    // A escola precisa de ao menos um evento vinculado para que exista
    // um conjunto de modalidades contra o qual validar.
    #[error("A escola não possui eventos vinculados")]
    SchoolWithoutEvents,

    #[error("Modalidades não permitidas para os eventos desta escola: {}", .0.join(", "))]
    ModalitiesNotAllowed(Vec<String>),

    #[error("Este técnico já está vinculado a esta escola")]
    TechnicianAlreadyLinked,

    #[error("Permissão negada: {0}")]
    PermissionDenied(String),

    // Variante para erros da camada de armazenamento
    #[error("Erro de armazenamento")]
    StorageError(#[from] StoreError),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    // Mensagem pronta para exibição ao usuário final.
    // O `tracing` loga a mensagem detalhada; o usuário recebe a genérica.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "Um ou mais campos são inválidos.".to_string(),
            AppError::ModalitiesNotAllowed(ids) => format!(
                "As seguintes modalidades não são permitidas para os eventos desta escola: {}.",
                ids.join(", ")
            ),
            AppError::StorageError(e) => {
                tracing::error!("Erro de armazenamento: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Erro interno: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
            other => other.to_string(),
        }
    }
}
