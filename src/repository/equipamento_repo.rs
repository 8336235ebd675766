// ==========================================
// Backend de Medições - Repositório de Equipamentos
// ==========================================
// A importação de equipamentos só insere (não existe chave natural nem
// caminho de update por id na planilha); o insert_tx é a operação usada
// pelo laço transacional da importação.
// ==========================================

use crate::db::open_connection;
use crate::domain::equipamento::{Equipamento, EquipamentoRow};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, Transaction};
use std::sync::{Arc, Mutex};

pub struct EquipamentoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EquipamentoRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Insere um equipamento
    pub fn create(&self, dados: &EquipamentoRow) -> RepositoryResult<Equipamento> {
        let conn = self.get_conn()?;
        let id = Self::insert_with(&conn, dados)?;
        Self::find_with(&conn, id)?.ok_or_else(|| Self::not_found(id))
    }

    /// Atualiza um equipamento pelo id (substituição completa + updated_at)
    pub fn update(&self, id: i64, dados: &EquipamentoRow) -> RepositoryResult<Equipamento> {
        let conn = self.get_conn()?;
        let afetadas = conn.execute(
            r#"
            UPDATE equipamentos SET
                tipo                   = ?1,
                marca                  = ?2,
                modelo                 = ?3,
                numero_serie           = ?4,
                data_ultima_calibracao = ?5,
                numero_certificado     = ?6,
                data_vencimento        = ?7,
                updated_at             = ?8
            WHERE id = ?9
            "#,
            params![
                dados.tipo,
                dados.marca,
                dados.modelo,
                dados.numero_serie,
                dados.data_ultima_calibracao,
                dados.numero_certificado,
                dados.data_vencimento,
                Utc::now(),
                id,
            ],
        )?;
        if afetadas == 0 {
            return Err(Self::not_found(id));
        }
        Self::find_with(&conn, id)?.ok_or_else(|| Self::not_found(id))
    }

    /// Remove um equipamento
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afetadas = conn.execute("DELETE FROM equipamentos WHERE id = ?1", params![id])?;
        if afetadas == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    /// Lista todos os equipamentos ordenados por id
    pub fn list(&self) -> RepositoryResult<Vec<Equipamento>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, tipo, marca, modelo, numero_serie,
                   data_ultima_calibracao, numero_certificado, data_vencimento,
                   created_at, updated_at
            FROM equipamentos ORDER BY id
            "#,
        )?;
        let rows = stmt.query_map([], Self::map_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Busca equipamento por id
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Equipamento>> {
        let conn = self.get_conn()?;
        Self::find_with(&conn, id)
    }

    /// Total de equipamentos cadastrados
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let total = conn.query_row("SELECT COUNT(*) FROM equipamentos", [], |row| row.get(0))?;
        Ok(total)
    }

    // ==========================================
    // Operação com escopo de transação (importação)
    // ==========================================

    /// Insere dentro de uma transação já aberta; retorna o id gerado
    pub fn insert_tx(tx: &Transaction<'_>, dados: &EquipamentoRow) -> RepositoryResult<i64> {
        Self::insert_with(tx, dados)
    }

    // ==========================================
    // Auxiliares internos
    // ==========================================

    fn insert_with(conn: &Connection, dados: &EquipamentoRow) -> RepositoryResult<i64> {
        let agora = Utc::now();
        conn.execute(
            r#"
            INSERT INTO equipamentos
                (tipo, marca, modelo, numero_serie,
                 data_ultima_calibracao, numero_certificado, data_vencimento,
                 created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                dados.tipo,
                dados.marca,
                dados.modelo,
                dados.numero_serie,
                dados.data_ultima_calibracao,
                dados.numero_certificado,
                dados.data_vencimento,
                agora,
                agora,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn find_with(conn: &Connection, id: i64) -> RepositoryResult<Option<Equipamento>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, tipo, marca, modelo, numero_serie,
                   data_ultima_calibracao, numero_certificado, data_vencimento,
                   created_at, updated_at
            FROM equipamentos WHERE id = ?1
            "#,
        )?;
        let result = stmt.query_row(params![id], Self::map_row);
        match result {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Equipamento> {
        Ok(Equipamento {
            id: row.get(0)?,
            tipo: row.get(1)?,
            marca: row.get(2)?,
            modelo: row.get(3)?,
            numero_serie: row.get(4)?,
            data_ultima_calibracao: row.get(5)?,
            numero_certificado: row.get(6)?,
            data_vencimento: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    fn not_found(id: i64) -> RepositoryError {
        RepositoryError::NotFound {
            entity: "Equipamento".to_string(),
            id: id.to_string(),
        }
    }
}
