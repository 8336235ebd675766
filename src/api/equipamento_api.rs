// ==========================================
// Backend de Medições - API de Equipamentos
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::equipamento::{Equipamento, EquipamentoRow};
use crate::importer::batch_runner::ImportSummary;
use crate::importer::equipamento_importer::EquipamentoImporter;
use crate::importer::ImportadorPlanilha;
use crate::repository::equipamento_repo::EquipamentoRepository;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::info;

pub struct EquipamentoApi {
    conn: Arc<Mutex<Connection>>,
    repo: Arc<EquipamentoRepository>,
}

impl EquipamentoApi {
    pub fn new(conn: Arc<Mutex<Connection>>, repo: Arc<EquipamentoRepository>) -> Self {
        Self { conn, repo }
    }

    fn validar(dados: &EquipamentoRow) -> ApiResult<()> {
        if dados.tipo.trim().is_empty()
            || dados.marca.trim().is_empty()
            || dados.modelo.trim().is_empty()
        {
            return Err(ApiError::Validation(
                "Campos \"Tipo\", \"Marca\" e \"Modelo\" são obrigatórios".to_string(),
            ));
        }
        Ok(())
    }

    pub fn create(&self, dados: &EquipamentoRow) -> ApiResult<Equipamento> {
        Self::validar(dados)?;
        Ok(self.repo.create(dados)?)
    }

    pub fn update(&self, id: i64, dados: &EquipamentoRow) -> ApiResult<Equipamento> {
        Self::validar(dados)?;
        Ok(self.repo.update(id, dados)?)
    }

    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.repo.delete(id)?;
        Ok(())
    }

    pub fn list(&self) -> ApiResult<Vec<Equipamento>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> ApiResult<Equipamento> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("Equipamento não encontrado.".to_string()))
    }

    /// Importa a planilha padrão de equipamentos (só insere)
    pub async fn import(&self, nome_arquivo: &str, bytes: &[u8]) -> ApiResult<ImportSummary> {
        info!("importação de equipamentos solicitada: arquivo='{}'", nome_arquivo);
        let importer = EquipamentoImporter::from_connection(self.conn.clone());
        Ok(importer.importar(nome_arquivo, bytes).await?)
    }
}
