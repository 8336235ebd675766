// ==========================================
// Backend de Medições - API de Medições
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::medicao::{Medicao, NovaMedicao};
use crate::repository::medicao_repo::MedicaoRepository;
use std::sync::Arc;

pub struct MedicaoApi {
    repo: Arc<MedicaoRepository>,
}

impl MedicaoApi {
    pub fn new(repo: Arc<MedicaoRepository>) -> Self {
        Self { repo }
    }

    fn validar(dados: &NovaMedicao) -> ApiResult<()> {
        if dados.funcionario_id.is_none() {
            return Err(ApiError::Validation(
                "Campo \"funcionario_id\" é obrigatório".to_string(),
            ));
        }
        Ok(())
    }

    pub fn create(&self, dados: &NovaMedicao) -> ApiResult<Medicao> {
        Self::validar(dados)?;
        Ok(self.repo.create(dados)?)
    }

    pub fn update(&self, id: i64, dados: &NovaMedicao) -> ApiResult<Medicao> {
        Self::validar(dados)?;
        Ok(self.repo.update(id, dados)?)
    }

    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.repo.delete(id)?;
        Ok(())
    }

    pub fn list(&self) -> ApiResult<Vec<Medicao>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> ApiResult<Medicao> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("Medição não encontrada.".to_string()))
    }

    /// Última medição do funcionário; None quando ele ainda não tem
    pub fn by_funcionario(&self, funcionario_id: i64) -> ApiResult<Option<Medicao>> {
        Ok(self.repo.find_by_funcionario(funcionario_id)?)
    }
}
