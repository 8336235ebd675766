// ==========================================
// Backend de Medições - Importação de Planilhas
// ==========================================
// Pipeline: leitura (sheet) -> resolução de cabeçalhos (row_mapper)
// -> validação (row_validator) -> persistência em lote transacional
// (batch_runner). Os importadores concretos amarram as etapas para
// cada tipo de planilha.
// ==========================================

pub mod batch_runner;
pub mod equipamento_importer;
pub mod error;
pub mod funcionario_importer;
pub mod row_mapper;
pub mod row_validator;
pub mod sheet;

pub use batch_runner::{ImportSummary, RowError, UpsertOutcome};
pub use equipamento_importer::EquipamentoImporter;
pub use error::{ImportError, RowIssue};
pub use funcionario_importer::FuncionarioImporter;
pub use row_mapper::HeaderResolver;
pub use sheet::{Cell, Planilha};

use async_trait::async_trait;

/// Ponto de entrada comum dos importadores de planilha
#[async_trait]
pub trait ImportadorPlanilha {
    /// Importa os bytes de um upload; o nome do arquivo decide o
    /// parser (xlsx/xls/csv)
    async fn importar(&self, nome_arquivo: &str, bytes: &[u8])
        -> Result<ImportSummary, ImportError>;
}
