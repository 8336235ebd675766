// ==========================================
// Backend de Medições - Entidade Empresa
// ==========================================

use serde::{Deserialize, Serialize};

/// Empresa cliente (dona dos funcionários avaliados)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Empresa {
    pub id: i64,
    pub nome: String,
    pub cnpj: String,
}

/// Payload de criação/atualização de empresa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovaEmpresa {
    pub nome: String,
    pub cnpj: String,
}
