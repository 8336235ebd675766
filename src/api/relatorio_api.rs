// ==========================================
// Backend de Medições - API de Relatório
// ==========================================
// Monta o relatório consolidado por matrícula: funcionário + empresa
// + última medição, com equipamento e avaliador quando vinculados.
// Vínculos quebrados (equipamento ou avaliador removidos) não anulam
// o relatório, só ficam ausentes.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::relatorio::{AvaliadorResumo, EquipamentoResumo, Relatorio};
use crate::repository::empresa_repo::EmpresaRepository;
use crate::repository::funcionario_repo::FuncionarioRepository;
use crate::repository::medicao_repo::MedicaoRepository;
use crate::repository::equipamento_repo::EquipamentoRepository;
use crate::repository::usuario_repo::UsuarioRepository;
use std::sync::Arc;
use tracing::debug;

pub struct RelatorioApi {
    empresa_repo: Arc<EmpresaRepository>,
    funcionario_repo: Arc<FuncionarioRepository>,
    medicao_repo: Arc<MedicaoRepository>,
    equipamento_repo: Arc<EquipamentoRepository>,
    usuario_repo: Arc<UsuarioRepository>,
}

impl RelatorioApi {
    pub fn new(
        empresa_repo: Arc<EmpresaRepository>,
        funcionario_repo: Arc<FuncionarioRepository>,
        medicao_repo: Arc<MedicaoRepository>,
        equipamento_repo: Arc<EquipamentoRepository>,
        usuario_repo: Arc<UsuarioRepository>,
    ) -> Self {
        Self {
            empresa_repo,
            funcionario_repo,
            medicao_repo,
            equipamento_repo,
            usuario_repo,
        }
    }

    pub fn by_matricula(&self, matricula: &str) -> ApiResult<Relatorio> {
        let matricula = matricula.trim();
        if matricula.is_empty() {
            return Err(ApiError::Validation(
                "Campo \"matricula\" é obrigatório".to_string(),
            ));
        }

        let funcionario = self
            .funcionario_repo
            .find_by_matricula(matricula)?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "Nenhum funcionário encontrado com matrícula \"{}\".",
                    matricula
                ))
            })?;

        let medicao = self
            .medicao_repo
            .find_by_funcionario(funcionario.id)?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "Nenhuma medição encontrada para o funcionário ID {}.",
                    funcionario.id
                ))
            })?;

        let empresa_id = funcionario
            .empresa_id
            .ok_or_else(|| ApiError::NotFound("Empresa não encontrada.".to_string()))?;
        let empresa = self
            .empresa_repo
            .find_by_id(empresa_id)?
            .ok_or_else(|| ApiError::NotFound("Empresa não encontrada.".to_string()))?;

        let equipamento = match medicao.equipamento_id {
            Some(id) => self.equipamento_repo.find_by_id(id)?.map(|e| {
                EquipamentoResumo {
                    id: e.id,
                    tipo: e.tipo,
                    marca: e.marca,
                    modelo: e.modelo,
                    numero_serie: e.numero_serie,
                }
            }),
            None => None,
        };

        let avaliador = match medicao.avaliador_id {
            Some(id) => self.usuario_repo.find_by_id(id)?.map(|u| AvaliadorResumo {
                avaliador_id: u.id,
                avaliador_nome: u.nome,
                avaliador_email: u.email,
            }),
            None => None,
        };

        debug!(
            "relatório montado: matricula={} funcionario_id={}",
            matricula, funcionario.id
        );

        Ok(Relatorio {
            empresa,
            funcionario,
            medicao,
            equipamento,
            avaliador,
        })
    }
}
