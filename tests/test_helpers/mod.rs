// ==========================================
// Backend de Medições - Auxiliares de Teste
// ==========================================

use medicao_api::db;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Conexão em memória com o schema aplicado, no formato compartilhado
/// que os repositórios e importadores esperam
pub fn conexao_compartilhada() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().expect("abrir banco em memória");
    db::configure_connection(&conn).expect("configurar PRAGMAs");
    db::init_schema(&conn).expect("criar schema");
    Arc::new(Mutex::new(conn))
}

/// Insere uma empresa direto no banco e devolve o id
pub fn criar_empresa(conn: &Arc<Mutex<Connection>>, nome: &str, cnpj: &str) -> i64 {
    let guard = conn.lock().unwrap();
    guard
        .execute(
            "INSERT INTO empresas (nome, cnpj) VALUES (?1, ?2)",
            [nome, cnpj],
        )
        .expect("inserir empresa");
    guard.last_insert_rowid()
}

/// Conta as linhas de uma tabela
pub fn contar(conn: &Arc<Mutex<Connection>>, tabela: &str) -> i64 {
    let guard = conn.lock().unwrap();
    guard
        .query_row(&format!("SELECT COUNT(*) FROM {tabela}"), [], |r| r.get(0))
        .expect("contar linhas")
}
