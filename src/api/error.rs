// ==========================================
// Backend de Medições - Erros da Camada de API
// ==========================================
// Conjunto fechado de erros, cada um com um status HTTP fixo. A
// conversão a partir das camadas de baixo transforma erro técnico em
// mensagem apresentável ao cliente.
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Entrada rejeitada (400)
    #[error("{0}")]
    Validation(String),

    /// Falha de autenticação (401)
    #[error("{0}")]
    Auth(String),

    /// Recurso inexistente (404)
    #[error("{0}")]
    NotFound(String),

    /// Falha interna (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Status HTTP correspondente
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::Auth(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }
}

/// Mensagem de "não encontrado" por entidade, já no gênero certo
fn mensagem_nao_encontrado(entity: &str) -> String {
    match entity {
        "Empresa" => "Empresa não encontrada.".to_string(),
        "Funcionario" => "Funcionário não encontrado.".to_string(),
        "Equipamento" => "Equipamento não encontrado.".to_string(),
        "Medicao" => "Medição não encontrada.".to_string(),
        "Usuario" => "Usuário não encontrado.".to_string(),
        outro => format!("{} não encontrado(a).", outro),
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, .. } => {
                ApiError::NotFound(mensagem_nao_encontrado(&entity))
            }
            outro => ApiError::Internal(outro.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            // problemas do arquivo enviado são culpa do cliente
            ImportError::UnsupportedFormat(_) | ImportError::PlanilhaVazia => {
                ApiError::Validation(err.to_string())
            }
            outro => ApiError::Internal(outro.to_string()),
        }
    }
}

/// Result da camada de API
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_por_variante() {
        assert_eq!(ApiError::Validation("x".into()).status(), 400);
        assert_eq!(ApiError::Auth("x".into()).status(), 401);
        assert_eq!(ApiError::NotFound("x".into()).status(), 404);
        assert_eq!(ApiError::Internal("x".into()).status(), 500);
    }

    #[test]
    fn test_not_found_vira_mensagem_da_entidade() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "Medicao".to_string(),
            id: "9".to_string(),
        }
        .into();
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Medição não encontrada."),
            _ => panic!("esperava NotFound"),
        }
    }

    #[test]
    fn test_erro_de_constraint_vira_interno() {
        let err: ApiError =
            RepositoryError::UniqueConstraintViolation("cnpj".to_string()).into();
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn test_formato_nao_suportado_e_erro_do_cliente() {
        let err: ApiError = ImportError::UnsupportedFormat("pdf".to_string()).into();
        assert_eq!(err.status(), 400);

        let err: ApiError = ImportError::Transaction("commit".to_string()).into();
        assert_eq!(err.status(), 500);
    }
}
