// ==========================================
// Backend de Medições - API de Empresas
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::empresa::{Empresa, NovaEmpresa};
use crate::repository::empresa_repo::EmpresaRepository;
use std::sync::Arc;
use tracing::info;

pub struct EmpresaApi {
    repo: Arc<EmpresaRepository>,
}

impl EmpresaApi {
    pub fn new(repo: Arc<EmpresaRepository>) -> Self {
        Self { repo }
    }

    fn validar(dados: &NovaEmpresa) -> ApiResult<()> {
        if dados.nome.trim().is_empty() || dados.cnpj.trim().is_empty() {
            return Err(ApiError::Validation(
                "Campos \"nome\" e \"cnpj\" são obrigatórios.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn create(&self, dados: &NovaEmpresa) -> ApiResult<Empresa> {
        Self::validar(dados)?;
        let empresa = self.repo.create(dados)?;
        info!("empresa criada: id={} nome={}", empresa.id, empresa.nome);
        Ok(empresa)
    }

    pub fn update(&self, id: i64, dados: &NovaEmpresa) -> ApiResult<Empresa> {
        Self::validar(dados)?;
        Ok(self.repo.update(id, dados)?)
    }

    /// Remove a empresa e seus funcionários
    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.repo.delete(id)?;
        info!("empresa removida: id={}", id);
        Ok(())
    }

    pub fn list(&self) -> ApiResult<Vec<Empresa>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> ApiResult<Empresa> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("Empresa não encontrada.".to_string()))
    }
}
