// ==========================================
// Backend de Medições - Erros da camada de repositório
// ==========================================
// Ferramenta: macro derive do thiserror
// ==========================================

use thiserror::Error;

/// Erros da camada de repositório
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== erros de banco =====
    #[error("registro não encontrado: {entity} com id={id}")]
    NotFound { entity: String, id: String },

    #[error("falha de conexão com o banco: {0}")]
    DatabaseConnectionError(String),

    #[error("falha ao obter lock do banco: {0}")]
    LockError(String),

    #[error("falha de transação no banco: {0}")]
    DatabaseTransactionError(String),

    #[error("falha de consulta no banco: {0}")]
    DatabaseQueryError(String),

    #[error("violação de restrição de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("violação de chave estrangeira: {0}")]
    ForeignKeyViolation(String),

    // ===== genéricos =====
    #[error("erro interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Conversão a partir de rusqlite::Error
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Desconhecida".to_string(),
                id: "Desconhecido".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Alias de Result da camada
pub type RepositoryResult<T> = Result<T, RepositoryError>;
