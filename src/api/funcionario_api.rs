// ==========================================
// Backend de Medições - API de Funcionários
// ==========================================
// Além do CRUD, expõe a importação de planilha vinculada a uma
// empresa. A API guarda a conexão compartilhada para construir o
// importador com o escopo da empresa em cada chamada.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::funcionario::{Funcionario, FuncionarioComStatus, NovoFuncionario};
use crate::importer::batch_runner::ImportSummary;
use crate::importer::funcionario_importer::FuncionarioImporter;
use crate::importer::ImportadorPlanilha;
use crate::repository::empresa_repo::EmpresaRepository;
use crate::repository::funcionario_repo::FuncionarioRepository;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::info;

pub struct FuncionarioApi {
    conn: Arc<Mutex<Connection>>,
    repo: Arc<FuncionarioRepository>,
    empresa_repo: Arc<EmpresaRepository>,
}

impl FuncionarioApi {
    pub fn new(
        conn: Arc<Mutex<Connection>>,
        repo: Arc<FuncionarioRepository>,
        empresa_repo: Arc<EmpresaRepository>,
    ) -> Self {
        Self {
            conn,
            repo,
            empresa_repo,
        }
    }

    fn validar(dados: &NovoFuncionario) -> ApiResult<()> {
        if dados.nome.trim().is_empty() {
            return Err(ApiError::Validation(
                "Campo \"nome\" é obrigatório".to_string(),
            ));
        }
        Ok(())
    }

    pub fn create(&self, dados: &NovoFuncionario) -> ApiResult<Funcionario> {
        Self::validar(dados)?;
        Ok(self.repo.create(dados)?)
    }

    pub fn update(&self, id: i64, dados: &NovoFuncionario) -> ApiResult<Funcionario> {
        Self::validar(dados)?;
        Ok(self.repo.update(id, dados)?)
    }

    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.repo.delete(id)?;
        Ok(())
    }

    pub fn list(&self) -> ApiResult<Vec<Funcionario>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> ApiResult<Funcionario> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("Funcionário não encontrado.".to_string()))
    }

    /// Funcionários da empresa com o status da última medição
    pub fn list_by_empresa(&self, empresa_id: i64) -> ApiResult<Vec<FuncionarioComStatus>> {
        self.exigir_empresa(empresa_id)?;
        Ok(self.repo.list_by_empresa(empresa_id)?)
    }

    /// Importa a planilha de funcionários para uma empresa
    pub async fn import_by_empresa(
        &self,
        empresa_id: i64,
        nome_arquivo: &str,
        bytes: &[u8],
    ) -> ApiResult<ImportSummary> {
        self.exigir_empresa(empresa_id)?;
        info!(
            "importação de funcionários solicitada: empresa_id={} arquivo='{}'",
            empresa_id, nome_arquivo
        );

        let importer = FuncionarioImporter::from_connection(self.conn.clone(), empresa_id);
        Ok(importer.importar(nome_arquivo, bytes).await?)
    }

    fn exigir_empresa(&self, empresa_id: i64) -> ApiResult<()> {
        self.empresa_repo
            .find_by_id(empresa_id)?
            .ok_or_else(|| ApiError::NotFound("Empresa não encontrada.".to_string()))?;
        Ok(())
    }
}
