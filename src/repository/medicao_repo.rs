// ==========================================
// Backend de Medições - Repositório de Medições
// ==========================================

use crate::db::open_connection;
use crate::domain::medicao::{Medicao, NovaMedicao};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

const COLUNAS: &str = r#"
    id, funcionario_id, equipamento_id, avaliador_id, status,
    data_medicao, hora_inicio, hora_fim, tempo_mostragem,
    nen_q5, lavg_q5, nen_q3, lavg_q3,
    calibracao_inicial, calibracao_final, desvio,
    tempo_pausa, inicio_pausa, final_pausa,
    jornada_trabalho, observacao,
    created_at, updated_at
"#;

pub struct MedicaoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MedicaoRepository {
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

    /// Insere uma medição
    pub fn create(&self, dados: &NovaMedicao) -> RepositoryResult<Medicao> {
        let conn = self.get_conn()?;
        let agora = Utc::now();
        conn.execute(
            r#"
            INSERT INTO medicao (
                funcionario_id, equipamento_id, avaliador_id, status,
                data_medicao, hora_inicio, hora_fim, tempo_mostragem,
                nen_q5, lavg_q5, nen_q3, lavg_q3,
                calibracao_inicial, calibracao_final, desvio,
                tempo_pausa, inicio_pausa, final_pausa,
                jornada_trabalho, observacao,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22
            )
            "#,
            params![
                dados.funcionario_id,
                dados.equipamento_id,
                dados.avaliador_id,
                dados.status,
                dados.data_medicao,
                dados.hora_inicio,
                dados.hora_fim,
                dados.tempo_mostragem,
                dados.nen_q5,
                dados.lavg_q5,
                dados.nen_q3,
                dados.lavg_q3,
                dados.calibracao_inicial,
                dados.calibracao_final,
                dados.desvio,
                dados.tempo_pausa,
                dados.inicio_pausa,
                dados.final_pausa,
                dados.jornada_trabalho,
                dados.observacao,
                agora,
                agora,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Self::find_with(&conn, id)?.ok_or_else(|| Self::not_found(id))
    }

    /// Atualiza uma medição pelo id (substituição completa + updated_at)
    pub fn update(&self, id: i64, dados: &NovaMedicao) -> RepositoryResult<Medicao> {
        let conn = self.get_conn()?;
        let afetadas = conn.execute(
            r#"
            UPDATE medicao SET
                funcionario_id     = ?1,
                equipamento_id     = ?2,
                avaliador_id       = ?3,
                status             = ?4,
                data_medicao       = ?5,
                hora_inicio        = ?6,
                hora_fim           = ?7,
                tempo_mostragem    = ?8,
                nen_q5             = ?9,
                lavg_q5            = ?10,
                nen_q3             = ?11,
                lavg_q3            = ?12,
                calibracao_inicial = ?13,
                calibracao_final   = ?14,
                desvio             = ?15,
                tempo_pausa        = ?16,
                inicio_pausa       = ?17,
                final_pausa        = ?18,
                jornada_trabalho   = ?19,
                observacao         = ?20,
                updated_at         = ?21
            WHERE id = ?22
            "#,
            params![
                dados.funcionario_id,
                dados.equipamento_id,
                dados.avaliador_id,
                dados.status,
                dados.data_medicao,
                dados.hora_inicio,
                dados.hora_fim,
                dados.tempo_mostragem,
                dados.nen_q5,
                dados.lavg_q5,
                dados.nen_q3,
                dados.lavg_q3,
                dados.calibracao_inicial,
                dados.calibracao_final,
                dados.desvio,
                dados.tempo_pausa,
                dados.inicio_pausa,
                dados.final_pausa,
                dados.jornada_trabalho,
                dados.observacao,
                Utc::now(),
                id,
            ],
        )?;
        if afetadas == 0 {
            return Err(Self::not_found(id));
        }
        Self::find_with(&conn, id)?.ok_or_else(|| Self::not_found(id))
    }

    /// Remove uma medição
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afetadas = conn.execute("DELETE FROM medicao WHERE id = ?1", params![id])?;
        if afetadas == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    /// Lista todas as medições, mais recentes primeiro
    pub fn list(&self) -> RepositoryResult<Vec<Medicao>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {COLUNAS} FROM medicao ORDER BY data_medicao DESC");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::map_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Busca medição por id
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Medicao>> {
        let conn = self.get_conn()?;
        Self::find_with(&conn, id)
    }

    /// Última medição de um funcionário (None se não houver)
    pub fn find_by_funcionario(&self, funcionario_id: i64) -> RepositoryResult<Option<Medicao>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {COLUNAS} FROM medicao
              WHERE funcionario_id = ?1
              ORDER BY data_medicao DESC
              LIMIT 1"
        );
        let mut stmt = conn.prepare(&sql)?;
        let result = stmt.query_row(params![funcionario_id], Self::map_row);
        match result {
            Ok(m) => Ok(Some(m)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ==========================================
    // Auxiliares internos
    // ==========================================

    fn find_with(conn: &Connection, id: i64) -> RepositoryResult<Option<Medicao>> {
        let sql = format!("SELECT {COLUNAS} FROM medicao WHERE id = ?1");
        let mut stmt = conn.prepare(&sql)?;
        let result = stmt.query_row(params![id], Self::map_row);
        match result {
            Ok(m) => Ok(Some(m)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Medicao> {
        Ok(Medicao {
            id: row.get(0)?,
            funcionario_id: row.get(1)?,
            equipamento_id: row.get(2)?,
            avaliador_id: row.get(3)?,
            status: row.get(4)?,
            data_medicao: row.get(5)?,
            hora_inicio: row.get(6)?,
            hora_fim: row.get(7)?,
            tempo_mostragem: row.get(8)?,
            nen_q5: row.get(9)?,
            lavg_q5: row.get(10)?,
            nen_q3: row.get(11)?,
            lavg_q3: row.get(12)?,
            calibracao_inicial: row.get(13)?,
            calibracao_final: row.get(14)?,
            desvio: row.get(15)?,
            tempo_pausa: row.get(16)?,
            inicio_pausa: row.get(17)?,
            final_pausa: row.get(18)?,
            jornada_trabalho: row.get(19)?,
            observacao: row.get(20)?,
            created_at: row.get(21)?,
            updated_at: row.get(22)?,
        })
    }

    fn not_found(id: i64) -> RepositoryError {
        RepositoryError::NotFound {
            entity: "Medicao".to_string(),
            id: id.to_string(),
        }
    }
}
