// ==========================================
// Backend de Medições - Execução do Lote
// ==========================================
// Uma transação por importação. Erro de linha não interrompe o lote:
// a linha entra no relatório e o laço continua. Só falha de begin ou
// de commit é fatal; nesse caso nada do lote é persistido.
// ==========================================

use crate::importer::error::{ImportError, RowIssue};
use crate::importer::sheet::Cell;
use rusqlite::{Connection, Transaction};
use serde::Serialize;
use tracing::{info, warn};

/// Resultado da persistência de uma linha
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Erro de uma linha, com o número visível na planilha
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

/// Relatório devolvido ao cliente ao fim da importação
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
    pub errors: Vec<RowError>,
}

/// Executa o lote dentro de uma única transação
///
/// `primeira_linha` é o número visível da primeira linha de dados na
/// planilha (a numeração dos erros é calculada a partir dele). O
/// callback devolve Ok(None) para linha em branco (ignorada sem
/// registrar resultado) e Err(RowIssue) para linha inválida.
pub fn executar_lote<F>(
    conn: &mut Connection,
    linhas: &[Vec<Cell>],
    primeira_linha: usize,
    mut persistir: F,
) -> Result<ImportSummary, ImportError>
where
    F: FnMut(&Transaction<'_>, &[Cell]) -> Result<Option<UpsertOutcome>, RowIssue>,
{
    let tx = conn
        .transaction()
        .map_err(|e| ImportError::Transaction(e.to_string()))?;

    let mut resumo = ImportSummary::default();
    for (idx, linha) in linhas.iter().enumerate() {
        let numero = primeira_linha + idx;
        match persistir(&tx, linha) {
            Ok(Some(UpsertOutcome::Inserted)) => resumo.inserted += 1,
            Ok(Some(UpsertOutcome::Updated)) => resumo.updated += 1,
            Ok(None) => {} // linha em branco
            Err(issue) => {
                warn!("importação: linha {} rejeitada: {}", numero, issue);
                resumo.errors.push(RowError {
                    row: numero,
                    message: issue.to_string(),
                });
            }
        }
    }

    // o commit acontece mesmo com erros de linha; só a falha do próprio
    // commit descarta o lote
    tx.commit()
        .map_err(|e| ImportError::Transaction(e.to_string()))?;

    info!(
        "importação concluída: {} inseridos, {} atualizados, {} erros",
        resumo.inserted,
        resumo.updated,
        resumo.errors.len()
    );
    Ok(resumo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn conexao_teste() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        db::configure_connection(&conn).unwrap();
        conn.execute("CREATE TABLE itens (id INTEGER PRIMARY KEY, nome TEXT NOT NULL)", [])
            .unwrap();
        conn
    }

    fn linha(texto: &str) -> Vec<Cell> {
        vec![Cell::Text(texto.to_string())]
    }

    #[test]
    fn test_erro_de_linha_nao_impede_o_resto_do_lote() {
        let mut conn = conexao_teste();
        let linhas = vec![linha("a"), linha("RUIM"), linha("c")];

        let resumo = executar_lote(&mut conn, &linhas, 2, |tx, l| {
            let nome = l[0].as_text().unwrap();
            if nome == "RUIM" {
                return Err(RowIssue::Persistencia("linha ruim".to_string()));
            }
            tx.execute("INSERT INTO itens (nome) VALUES (?1)", [&nome])
                .unwrap();
            Ok(Some(UpsertOutcome::Inserted))
        })
        .unwrap();

        assert_eq!(resumo.inserted, 2);
        assert_eq!(
            resumo.errors,
            vec![RowError {
                row: 3,
                message: "linha ruim".to_string()
            }]
        );

        // as linhas boas foram realmente persistidas
        let total: i64 = conn
            .query_row("SELECT COUNT(*) FROM itens", [], |r| r.get(0))
            .unwrap();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_linha_em_branco_nao_gera_resultado() {
        let mut conn = conexao_teste();
        let linhas = vec![linha("a"), vec![Cell::Empty], linha("b")];

        let resumo = executar_lote(&mut conn, &linhas, 2, |tx, l| {
            if l.iter().all(Cell::is_empty) {
                return Ok(None);
            }
            tx.execute(
                "INSERT INTO itens (nome) VALUES (?1)",
                [&l[0].as_text().unwrap()],
            )
            .unwrap();
            Ok(Some(UpsertOutcome::Inserted))
        })
        .unwrap();

        assert_eq!(resumo.inserted, 2);
        assert!(resumo.errors.is_empty());
    }

    #[test]
    fn test_falha_no_commit_descarta_o_lote_inteiro() {
        let mut conn = conexao_teste();
        conn.execute(
            "CREATE TABLE filhos (id INTEGER PRIMARY KEY,
                item_id INTEGER NOT NULL REFERENCES itens(id))",
            [],
        )
        .unwrap();
        // adia a checagem de FK para o commit, forçando uma falha de
        // transação em vez de uma falha de linha
        conn.execute_batch("PRAGMA defer_foreign_keys = ON").unwrap();

        let linhas = vec![linha("a"), linha("b")];
        let result = executar_lote(&mut conn, &linhas, 2, |tx, l| {
            tx.execute("INSERT INTO itens (nome) VALUES (?1)", [&l[0].as_text().unwrap()])
                .unwrap();
            tx.execute("INSERT INTO filhos (item_id) VALUES (999)", [])
                .unwrap();
            Ok(Some(UpsertOutcome::Inserted))
        });

        assert!(matches!(result, Err(ImportError::Transaction(_))));
        let total: i64 = conn
            .query_row("SELECT COUNT(*) FROM itens", [], |r| r.get(0))
            .unwrap();
        assert_eq!(total, 0);
    }
}
