// ==========================================
// Backend de Medições - Entidade Funcionário
// ==========================================

use serde::{Deserialize, Serialize};

/// Funcionário de uma empresa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Funcionario {
    pub id: i64,
    pub empresa_id: Option<i64>,
    pub setor: Option<String>,
    pub ghe: Option<String>,
    pub cargo: Option<String>,
    pub matricula: Option<String>,
    pub nome: String,
}

/// Funcionário + status da medição associada (listagem por empresa)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuncionarioComStatus {
    pub id: i64,
    pub empresa_id: Option<i64>,
    pub setor: Option<String>,
    pub ghe: Option<String>,
    pub cargo: Option<String>,
    pub matricula: Option<String>,
    pub nome: String,
    pub medicao_status: Option<String>,
}

/// Payload de criação/atualização de funcionário
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovoFuncionario {
    pub empresa_id: Option<i64>,
    pub setor: Option<String>,
    pub ghe: Option<String>,
    pub cargo: Option<String>,
    pub matricula: Option<String>,
    pub nome: String,
}

/// Registro canônico de uma linha da planilha de funcionários
///
/// Invariante: strings já vêm com trim aplicado; campos opcionais
/// ausentes viram None (nunca ficam "faltando").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncionarioRow {
    /// Id explícito da linha (coluna "id"); presente => update
    pub id: Option<i64>,
    pub nome: String,
    pub matricula: Option<String>,
    pub setor: Option<String>,
    pub ghe: Option<String>,
    pub cargo: Option<String>,
}
