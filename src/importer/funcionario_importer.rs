// ==========================================
// Backend de Medições - Importador de Funcionários
// ==========================================
// Planilha com cabeçalho na primeira linha; dados a partir da linha 2
// (numeração visível). Linha com coluna "id" preenchida atualiza o
// funcionário existente; sem "id", insere um novo.
// ==========================================

use crate::domain::funcionario::{FuncionarioRow, NovoFuncionario};
use crate::importer::batch_runner::{executar_lote, ImportSummary, UpsertOutcome};
use crate::importer::error::{ImportError, RowIssue};
use crate::importer::row_mapper::{HeaderResolver, APELIDOS_FUNCIONARIO};
use crate::importer::row_validator::validar_funcionario;
use crate::importer::{sheet, ImportadorPlanilha};
use crate::repository::error::RepositoryError;
use crate::repository::funcionario_repo::FuncionarioRepository;
use async_trait::async_trait;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Primeira linha de dados na numeração visível da planilha
const PRIMEIRA_LINHA_DADOS: usize = 2;

pub struct FuncionarioImporter {
    conn: Arc<Mutex<Connection>>,
    empresa_id: i64,
}

impl FuncionarioImporter {
    /// Importador com escopo fixo em uma empresa: toda linha importada
    /// é vinculada a ela
    pub fn from_connection(conn: Arc<Mutex<Connection>>, empresa_id: i64) -> Self {
        Self { conn, empresa_id }
    }

    fn mapear_linha(&self, resolver: &HeaderResolver, linha: &[sheet::Cell]) -> FuncionarioRow {
        FuncionarioRow {
            id: resolver.get_id(linha, "id"),
            nome: resolver.get_string(linha, "nome").unwrap_or_default(),
            matricula: resolver.get_string(linha, "matricula"),
            setor: resolver.get_string(linha, "setor"),
            ghe: resolver.get_string(linha, "ghe"),
            cargo: resolver.get_string(linha, "cargo"),
        }
    }
}

#[async_trait]
impl ImportadorPlanilha for FuncionarioImporter {
    async fn importar(
        &self,
        nome_arquivo: &str,
        bytes: &[u8],
    ) -> Result<ImportSummary, ImportError> {
        info!(
            "importando funcionários da empresa {} a partir de '{}'",
            self.empresa_id, nome_arquivo
        );

        let planilha = sheet::parse(nome_arquivo, bytes, 0)?;
        let resolver = HeaderResolver::resolve(&planilha.headers, APELIDOS_FUNCIONARIO);

        let mut conn = self
            .conn
            .lock()
            .map_err(|e| ImportError::Lock(e.to_string()))?;

        executar_lote(&mut conn, &planilha.rows, PRIMEIRA_LINHA_DADOS, |tx, linha| {
            if linha.iter().all(sheet::Cell::is_empty) {
                return Ok(None);
            }

            let row = self.mapear_linha(&resolver, linha);
            validar_funcionario(&row)?;

            let dados = NovoFuncionario {
                empresa_id: Some(self.empresa_id),
                setor: row.setor.clone(),
                ghe: row.ghe.clone(),
                cargo: row.cargo.clone(),
                matricula: row.matricula.clone(),
                nome: row.nome.clone(),
            };

            match row.id {
                Some(id) => {
                    FuncionarioRepository::update_tx(tx, id, &dados)
                        .map_err(mapear_erro_persistencia)?;
                    Ok(Some(UpsertOutcome::Updated))
                }
                None => {
                    FuncionarioRepository::insert_tx(tx, &dados)
                        .map_err(mapear_erro_persistencia)?;
                    Ok(Some(UpsertOutcome::Inserted))
                }
            }
        })
    }
}

fn mapear_erro_persistencia(e: RepositoryError) -> RowIssue {
    match e {
        RepositoryError::NotFound { .. } => {
            RowIssue::Persistencia("Funcionário não encontrado.".to_string())
        }
        outro => RowIssue::Persistencia(outro.to_string()),
    }
}
