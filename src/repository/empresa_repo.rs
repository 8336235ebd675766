// ==========================================
// Backend de Medições - Repositório de Empresas
// ==========================================
// Regra: repositório não contém lógica de negócio, só acesso a dados;
// todas as consultas são parametrizadas.
// ==========================================

use crate::db::open_connection;
use crate::domain::empresa::{Empresa, NovaEmpresa};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

pub struct EmpresaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EmpresaRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Cria o repositório a partir de uma conexão compartilhada
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Insere uma empresa
    pub fn create(&self, dados: &NovaEmpresa) -> RepositoryResult<Empresa> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO empresas (nome, cnpj) VALUES (?1, ?2)",
            params![dados.nome, dados.cnpj],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Empresa {
            id,
            nome: dados.nome.clone(),
            cnpj: dados.cnpj.clone(),
        })
    }

    /// Atualiza uma empresa pelo id
    pub fn update(&self, id: i64, dados: &NovaEmpresa) -> RepositoryResult<Empresa> {
        let conn = self.get_conn()?;
        let afetadas = conn.execute(
            "UPDATE empresas SET nome = ?1, cnpj = ?2 WHERE id = ?3",
            params![dados.nome, dados.cnpj, id],
        )?;
        if afetadas == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Empresa".to_string(),
                id: id.to_string(),
            });
        }
        Ok(Empresa {
            id,
            nome: dados.nome.clone(),
            cnpj: dados.cnpj.clone(),
        })
    }

    /// Remove uma empresa e seus funcionários dependentes
    ///
    /// A exclusão em cascata (funcionários antes da empresa) acontece na
    /// mesma transação: ou tudo some, ou nada some.
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            "DELETE FROM funcionarios WHERE empresa_id = ?1",
            params![id],
        )?;
        let afetadas = tx.execute("DELETE FROM empresas WHERE id = ?1", params![id])?;
        if afetadas == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Empresa".to_string(),
                id: id.to_string(),
            });
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }

    /// Lista todas as empresas ordenadas por nome
    pub fn list(&self) -> RepositoryResult<Vec<Empresa>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, nome, cnpj FROM empresas ORDER BY nome")?;
        let rows = stmt.query_map([], |row| {
            Ok(Empresa {
                id: row.get(0)?,
                nome: row.get(1)?,
                cnpj: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Busca empresa por id
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Empresa>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, nome, cnpj FROM empresas WHERE id = ?1")?;
        let result = stmt.query_row(params![id], |row| {
            Ok(Empresa {
                id: row.get(0)?,
                nome: row.get(1)?,
                cnpj: row.get(2)?,
            })
        });
        match result {
            Ok(empresa) => Ok(Some(empresa)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
