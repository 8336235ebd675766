// ==========================================
// Backend de Medições - Entidade Medição
// ==========================================
// Dosimetria de ruído de um funcionário: níveis NEN/Lavg nos critérios
// q5 e q3, calibrações e janela de amostragem.
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Medição de ruído ocupacional
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicao {
    pub id: i64,
    pub funcionario_id: Option<i64>,
    pub equipamento_id: Option<i64>,
    pub avaliador_id: Option<i64>,
    pub status: Option<String>,
    pub data_medicao: Option<NaiveDate>,
    pub hora_inicio: Option<String>,
    pub hora_fim: Option<String>,
    pub tempo_mostragem: Option<String>,
    pub nen_q5: Option<f64>,
    pub lavg_q5: Option<f64>,
    pub nen_q3: Option<f64>,
    pub lavg_q3: Option<f64>,
    pub calibracao_inicial: Option<f64>,
    pub calibracao_final: Option<f64>,
    pub desvio: Option<f64>,
    pub tempo_pausa: Option<String>,
    pub inicio_pausa: Option<String>,
    pub final_pausa: Option<String>,
    pub jornada_trabalho: Option<String>,
    pub observacao: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload de criação/atualização de medição
///
/// Campos de texto vazios são normalizados para None antes da escrita
/// (mesma regra do restante do sistema: opcional vazio => NULL).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NovaMedicao {
    pub funcionario_id: Option<i64>,
    pub equipamento_id: Option<i64>,
    pub avaliador_id: Option<i64>,
    pub status: Option<String>,
    pub data_medicao: Option<NaiveDate>,
    pub hora_inicio: Option<String>,
    pub hora_fim: Option<String>,
    pub tempo_mostragem: Option<String>,
    pub nen_q5: Option<f64>,
    pub lavg_q5: Option<f64>,
    pub nen_q3: Option<f64>,
    pub lavg_q3: Option<f64>,
    pub calibracao_inicial: Option<f64>,
    pub calibracao_final: Option<f64>,
    pub desvio: Option<f64>,
    pub tempo_pausa: Option<String>,
    pub inicio_pausa: Option<String>,
    pub final_pausa: Option<String>,
    pub jornada_trabalho: Option<String>,
    pub observacao: Option<String>,
}
