// ==========================================
// Backend de Medições - Importador de Equipamentos
// ==========================================
// A planilha de equipamentos tem linhas decorativas antes do
// cabeçalho (cabeçalho no índice 5, base zero). A importação só
// insere: não há chave natural nem coluna de id na planilha.
// ==========================================

use crate::domain::equipamento::EquipamentoRow;
use crate::importer::batch_runner::{executar_lote, ImportSummary, UpsertOutcome};
use crate::importer::error::{ImportError, RowIssue};
use crate::importer::row_mapper::{HeaderResolver, APELIDOS_EQUIPAMENTO};
use crate::importer::row_validator::validar_equipamento;
use crate::importer::{sheet, ImportadorPlanilha};
use crate::repository::equipamento_repo::EquipamentoRepository;
use async_trait::async_trait;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Índice (base zero) da linha de cabeçalho na planilha padrão
const LINHA_CABECALHO: usize = 5;
/// Número visível da primeira linha de dados, usado nos erros
const PRIMEIRA_LINHA_DADOS: usize = 6;

pub struct EquipamentoImporter {
    conn: Arc<Mutex<Connection>>,
}

impl EquipamentoImporter {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn mapear_linha(
        resolver: &HeaderResolver,
        linha: &[sheet::Cell],
    ) -> Result<EquipamentoRow, RowIssue> {
        Ok(EquipamentoRow {
            tipo: resolver.get_string(linha, "tipo").unwrap_or_default(),
            marca: resolver.get_string(linha, "marca").unwrap_or_default(),
            modelo: resolver.get_string(linha, "modelo").unwrap_or_default(),
            numero_serie: resolver.get_string(linha, "numero_serie"),
            data_ultima_calibracao: resolver.get_date(linha, "data_ultima_calibracao")?,
            numero_certificado: resolver.get_string(linha, "numero_certificado"),
            data_vencimento: resolver.get_date(linha, "data_vencimento")?,
        })
    }
}

#[async_trait]
impl ImportadorPlanilha for EquipamentoImporter {
    async fn importar(
        &self,
        nome_arquivo: &str,
        bytes: &[u8],
    ) -> Result<ImportSummary, ImportError> {
        info!("importando equipamentos a partir de '{}'", nome_arquivo);

        let planilha = sheet::parse(nome_arquivo, bytes, LINHA_CABECALHO)?;
        let resolver = HeaderResolver::resolve(&planilha.headers, APELIDOS_EQUIPAMENTO);

        let mut conn = self
            .conn
            .lock()
            .map_err(|e| ImportError::Lock(e.to_string()))?;

        executar_lote(&mut conn, &planilha.rows, PRIMEIRA_LINHA_DADOS, |tx, linha| {
            if linha.iter().all(sheet::Cell::is_empty) {
                return Ok(None);
            }

            let row = Self::mapear_linha(&resolver, linha)?;
            validar_equipamento(&row)?;

            EquipamentoRepository::insert_tx(tx, &row)
                .map_err(|e| RowIssue::Persistencia(e.to_string()))?;
            Ok(Some(UpsertOutcome::Inserted))
        })
    }
}
