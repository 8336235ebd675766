// ==========================================
// Backend de Medições - Repositório de Funcionários
// ==========================================
// Além do CRUD, expõe operações com escopo de transação (insert_tx /
// update_tx) usadas pelo laço de importação de planilhas, que mantém
// uma única transação para o lote inteiro.
// ==========================================

use crate::db::open_connection;
use crate::domain::funcionario::{Funcionario, FuncionarioComStatus, NovoFuncionario};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Transaction};
use std::sync::{Arc, Mutex};

pub struct FuncionarioRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FuncionarioRepository {
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

    /// Insere um funcionário
    pub fn create(&self, dados: &NovoFuncionario) -> RepositoryResult<Funcionario> {
        let conn = self.get_conn()?;
        let id = Self::insert_with(&conn, dados)?;
        Ok(Self::to_funcionario(id, dados))
    }

    /// Atualiza um funcionário pelo id (substituição completa dos campos)
    pub fn update(&self, id: i64, dados: &NovoFuncionario) -> RepositoryResult<Funcionario> {
        let conn = self.get_conn()?;
        Self::update_with(&conn, id, dados)?;
        Ok(Self::to_funcionario(id, dados))
    }

    /// Remove um funcionário
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afetadas = conn.execute("DELETE FROM funcionarios WHERE id = ?1", params![id])?;
        if afetadas == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    /// Lista todos os funcionários ordenados por nome
    pub fn list(&self) -> RepositoryResult<Vec<Funcionario>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, empresa_id, setor, ghe, cargo, matricula, nome
               FROM funcionarios ORDER BY nome",
        )?;
        let rows = stmt.query_map([], Self::map_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Busca funcionário por id
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Funcionario>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, empresa_id, setor, ghe, cargo, matricula, nome
               FROM funcionarios WHERE id = ?1",
        )?;
        let result = stmt.query_row(params![id], Self::map_row);
        match result {
            Ok(f) => Ok(Some(f)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Busca funcionário pela matrícula (primeira ocorrência)
    pub fn find_by_matricula(&self, matricula: &str) -> RepositoryResult<Option<Funcionario>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, empresa_id, setor, ghe, cargo, matricula, nome
               FROM funcionarios WHERE matricula = ?1 LIMIT 1",
        )?;
        let result = stmt.query_row(params![matricula], Self::map_row);
        match result {
            Ok(f) => Ok(Some(f)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Funcionários de uma empresa, com o status da medição (se existir)
    pub fn list_by_empresa(&self, empresa_id: i64) -> RepositoryResult<Vec<FuncionarioComStatus>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                f.id, f.empresa_id, f.setor, f.ghe, f.cargo, f.matricula, f.nome,
                m.status AS medicao_status
            FROM funcionarios f
            LEFT JOIN medicao m ON m.funcionario_id = f.id
            WHERE f.empresa_id = ?1
            ORDER BY f.nome
            "#,
        )?;
        let rows = stmt.query_map(params![empresa_id], |row| {
            Ok(FuncionarioComStatus {
                id: row.get(0)?,
                empresa_id: row.get(1)?,
                setor: row.get(2)?,
                ghe: row.get(3)?,
                cargo: row.get(4)?,
                matricula: row.get(5)?,
                nome: row.get(6)?,
                medicao_status: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    // ==========================================
    // Operações com escopo de transação (importação)
    // ==========================================

    /// Insere dentro de uma transação já aberta; retorna o id gerado
    pub fn insert_tx(tx: &Transaction<'_>, dados: &NovoFuncionario) -> RepositoryResult<i64> {
        Self::insert_with(tx, dados)
    }

    /// Atualiza dentro de uma transação já aberta
    ///
    /// Falha com NotFound quando o id alvo não existe (a importação
    /// reporta isso como erro de linha, não como erro fatal).
    pub fn update_tx(
        tx: &Transaction<'_>,
        id: i64,
        dados: &NovoFuncionario,
    ) -> RepositoryResult<()> {
        Self::update_with(tx, id, dados)
    }

    // ==========================================
    // Auxiliares internos
    // ==========================================

    fn insert_with(conn: &Connection, dados: &NovoFuncionario) -> RepositoryResult<i64> {
        conn.execute(
            r#"
            INSERT INTO funcionarios (empresa_id, setor, ghe, cargo, matricula, nome)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                dados.empresa_id,
                dados.setor,
                dados.ghe,
                dados.cargo,
                dados.matricula,
                dados.nome,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update_with(conn: &Connection, id: i64, dados: &NovoFuncionario) -> RepositoryResult<()> {
        let afetadas = conn.execute(
            r#"
            UPDATE funcionarios SET
                empresa_id = ?1,
                setor      = ?2,
                ghe        = ?3,
                cargo      = ?4,
                matricula  = ?5,
                nome       = ?6
            WHERE id = ?7
            "#,
            params![
                dados.empresa_id,
                dados.setor,
                dados.ghe,
                dados.cargo,
                dados.matricula,
                dados.nome,
                id,
            ],
        )?;
        if afetadas == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Funcionario> {
        Ok(Funcionario {
            id: row.get(0)?,
            empresa_id: row.get(1)?,
            setor: row.get(2)?,
            ghe: row.get(3)?,
            cargo: row.get(4)?,
            matricula: row.get(5)?,
            nome: row.get(6)?,
        })
    }

    fn not_found(id: i64) -> RepositoryError {
        RepositoryError::NotFound {
            entity: "Funcionario".to_string(),
            id: id.to_string(),
        }
    }

    fn to_funcionario(id: i64, dados: &NovoFuncionario) -> Funcionario {
        Funcionario {
            id,
            empresa_id: dados.empresa_id,
            setor: dados.setor.clone(),
            ghe: dados.ghe.clone(),
            cargo: dados.cargo.clone(),
            matricula: dados.matricula.clone(),
            nome: dados.nome.clone(),
        }
    }
}
