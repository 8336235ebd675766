// ==========================================
// Backend de Medições - Validação de Linhas
// ==========================================

use crate::domain::equipamento::EquipamentoRow;
use crate::domain::funcionario::FuncionarioRow;
use crate::importer::error::RowIssue;

/// Linha de funcionário: só o nome é obrigatório
pub fn validar_funcionario(linha: &FuncionarioRow) -> Result<(), RowIssue> {
    if linha.nome.trim().is_empty() {
        return Err(RowIssue::NomeObrigatorio);
    }
    Ok(())
}

/// Linha de equipamento: tipo, marca e modelo são obrigatórios
pub fn validar_equipamento(linha: &EquipamentoRow) -> Result<(), RowIssue> {
    if linha.tipo.trim().is_empty()
        || linha.marca.trim().is_empty()
        || linha.modelo.trim().is_empty()
    {
        return Err(RowIssue::CamposEquipamentoObrigatorios);
    }
    Ok(())
}
