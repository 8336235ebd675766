// ==========================================
// Backend de Medições - Entidade Equipamento
// ==========================================
// Dosímetros e calibradores usados nas medições de ruído.
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Equipamento de medição
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipamento {
    pub id: i64,
    pub tipo: String,
    pub marca: String,
    pub modelo: String,
    pub numero_serie: Option<String>,
    pub data_ultima_calibracao: Option<NaiveDate>,
    pub numero_certificado: Option<String>,
    pub data_vencimento: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registro canônico de uma linha da planilha de equipamentos
///
/// Também é o payload de criação/atualização via API: os campos e a
/// normalização (trim, opcional => None) são os mesmos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipamentoRow {
    pub tipo: String,
    pub marca: String,
    pub modelo: String,
    pub numero_serie: Option<String>,
    pub data_ultima_calibracao: Option<NaiveDate>,
    pub numero_certificado: Option<String>,
    pub data_vencimento: Option<NaiveDate>,
}
