// ==========================================
// Backend de Medições - Inicialização SQLite
// ==========================================
// Objetivo:
// - Unificar o comportamento de PRAGMA em todas as aberturas de conexão
//   (foreign_keys ligado em todas, não só em parte dos módulos)
// - Unificar busy_timeout para reduzir erros "database is busy" em
//   importações longas concorrendo com leituras
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout padrão (milissegundos)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configura os PRAGMAs unificados da conexão
///
/// Observação:
/// - foreign_keys precisa ser ligado por conexão
/// - busy_timeout precisa ser configurado por conexão
pub fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Abre uma conexão SQLite já configurada
pub fn open_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Cria o schema caso ainda não exista (idempotente)
///
/// As tabelas refletem o modelo relacional do sistema: empresas,
/// funcionários, equipamentos, medições e usuários. Toda escrita do
/// restante do crate assume que este schema já foi aplicado.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS empresas (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            nome        TEXT NOT NULL,
            cnpj        TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS funcionarios (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            empresa_id  INTEGER REFERENCES empresas(id),
            setor       TEXT,
            ghe         TEXT,
            cargo       TEXT,
            matricula   TEXT,
            nome        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS equipamentos (
            id                      INTEGER PRIMARY KEY AUTOINCREMENT,
            tipo                    TEXT NOT NULL,
            marca                   TEXT NOT NULL,
            modelo                  TEXT NOT NULL,
            numero_serie            TEXT,
            data_ultima_calibracao  TEXT,
            numero_certificado      TEXT,
            data_vencimento         TEXT,
            created_at              TEXT NOT NULL,
            updated_at              TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS usuarios (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            nome        TEXT NOT NULL,
            cpf         TEXT NOT NULL UNIQUE,
            email       TEXT NOT NULL UNIQUE,
            telefone    TEXT,
            senha_hash  TEXT NOT NULL,
            role        TEXT NOT NULL DEFAULT 'user',
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS medicao (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            funcionario_id      INTEGER REFERENCES funcionarios(id) ON DELETE CASCADE,
            equipamento_id      INTEGER REFERENCES equipamentos(id),
            avaliador_id        INTEGER REFERENCES usuarios(id),
            status              TEXT,
            data_medicao        TEXT,
            hora_inicio         TEXT,
            hora_fim            TEXT,
            tempo_mostragem     TEXT,
            nen_q5              REAL,
            lavg_q5             REAL,
            nen_q3              REAL,
            lavg_q3             REAL,
            calibracao_inicial  REAL,
            calibracao_final    REAL,
            desvio              REAL,
            tempo_pausa         TEXT,
            inicio_pausa        TEXT,
            final_pausa         TEXT,
            jornada_trabalho    TEXT,
            observacao          TEXT,
            created_at          TEXT NOT NULL,
            updated_at          TEXT NOT NULL
        );
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_idempotente() {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        // segunda aplicação não pode falhar
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
                 ('empresas','funcionarios','equipamentos','medicao','usuarios')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn test_foreign_keys_ligado() {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn).unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }
}
