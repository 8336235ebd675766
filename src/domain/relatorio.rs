// ==========================================
// Backend de Medições - Relatório
// ==========================================
// Visão montada para o relatório imprimível: empresa + funcionário +
// última medição + equipamento + avaliador. A renderização (PDF) é
// colaborador externo; aqui só existe a montagem dos dados.
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::empresa::Empresa;
use crate::domain::funcionario::Funcionario;
use crate::domain::medicao::Medicao;

/// Resumo do equipamento usado na medição do relatório
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipamentoResumo {
    pub id: i64,
    pub tipo: String,
    pub marca: String,
    pub modelo: String,
    pub numero_serie: Option<String>,
}

/// Resumo do avaliador responsável
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvaliadorResumo {
    pub avaliador_id: i64,
    pub avaliador_nome: String,
    pub avaliador_email: String,
}

/// Dados completos do relatório de um funcionário
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relatorio {
    pub empresa: Empresa,
    pub funcionario: Funcionario,
    pub medicao: Medicao,
    pub equipamento: Option<EquipamentoResumo>,
    pub avaliador: Option<AvaliadorResumo>,
}
