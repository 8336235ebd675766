// ==========================================
// Backend de Medições - Erros de Importação
// ==========================================
// Dois níveis de erro: ImportError aborta a importação inteira
// (nada é persistido); RowIssue invalida apenas a linha, que entra
// no relatório de erros sem interromper o lote.
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Erro fatal da importação (o lote inteiro é descartado)
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Formato de arquivo não suportado: {0}")]
    UnsupportedFormat(String),

    #[error("Planilha vazia ou sem linha de cabeçalho")]
    PlanilhaVazia,

    #[error("Erro ao ler arquivo Excel: {0}")]
    ExcelParse(String),

    #[error("Erro ao ler arquivo CSV: {0}")]
    CsvParse(String),

    #[error("Erro de transação: {0}")]
    Transaction(String),

    #[error("Erro de lock: {0}")]
    Lock(String),

    #[error("Erro de banco de dados: {0}")]
    Database(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ImportError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::LockError(msg) => ImportError::Lock(msg),
            RepositoryError::DatabaseTransactionError(msg) => ImportError::Transaction(msg),
            outro => ImportError::Database(outro.to_string()),
        }
    }
}

/// Problema de uma única linha da planilha
///
/// O Display destes erros é a mensagem exata devolvida ao cliente no
/// relatório de importação, por isso o texto é estável.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowIssue {
    #[error("Data inválida: \"{0}\"")]
    DataInvalida(String),

    #[error("Campo \"nome\" é obrigatório")]
    NomeObrigatorio,

    #[error("Campos \"Tipo\", \"Marca\" e \"Modelo\" são obrigatórios")]
    CamposEquipamentoObrigatorios,

    #[error("{0}")]
    Persistencia(String),
}
