// ==========================================
// Backend de Medições - Repositório de Usuários
// ==========================================
// A coluna de ordenação da listagem vem de uma whitelist fixa; é o
// único ponto onde um identificador entra no SQL fora de parâmetro.
// ==========================================

use crate::db::open_connection;
use crate::domain::usuario::{AtualizaUsuario, PaginaUsuarios, ParamsListagem, Usuario};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use std::sync::{Arc, Mutex};

/// Colunas permitidas no ORDER BY da listagem
const COLUNAS_ORDENAVEIS: [&str; 8] = [
    "id",
    "nome",
    "cpf",
    "email",
    "telefone",
    "role",
    "created_at",
    "updated_at",
];

fn sanitizar_order_by(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some(c) => COLUNAS_ORDENAVEIS
            .iter()
            .copied()
            .find(|&col| col == c)
            .unwrap_or("created_at"),
        None => "created_at",
    }
}

fn sanitizar_sort_dir(sort_dir: Option<&str>) -> &'static str {
    match sort_dir {
        Some(d) if d.eq_ignore_ascii_case("asc") => "ASC",
        _ => "DESC",
    }
}

pub struct UsuarioRepository {
    conn: Arc<Mutex<Connection>>,
}

impl UsuarioRepository {
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

    /// Insere um usuário com o hash de senha já calculado
    pub fn create(
        &self,
        nome: &str,
        cpf: &str,
        email: &str,
        telefone: Option<&str>,
        senha_hash: &str,
        role: &str,
    ) -> RepositoryResult<Usuario> {
        let conn = self.get_conn()?;
        let agora = Utc::now();
        conn.execute(
            r#"
            INSERT INTO usuarios (nome, cpf, email, telefone, senha_hash, role, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![nome, cpf, email, telefone, senha_hash, role, agora, agora],
        )?;
        let id = conn.last_insert_rowid();
        Self::find_with(&conn, id)?.ok_or_else(|| Self::not_found(id))
    }

    /// Atualiza dados cadastrais (não mexe na senha)
    pub fn update(&self, id: i64, dados: &AtualizaUsuario) -> RepositoryResult<Usuario> {
        let conn = self.get_conn()?;
        let role = dados.role.as_deref().unwrap_or("user");
        let afetadas = conn.execute(
            r#"
            UPDATE usuarios SET
                nome       = ?1,
                cpf        = ?2,
                email      = ?3,
                telefone   = ?4,
                role       = ?5,
                updated_at = ?6
            WHERE id = ?7
            "#,
            params![dados.nome, dados.cpf, dados.email, dados.telefone, role, Utc::now(), id],
        )?;
        if afetadas == 0 {
            return Err(Self::not_found(id));
        }
        Self::find_with(&conn, id)?.ok_or_else(|| Self::not_found(id))
    }

    /// Troca o hash de senha
    pub fn set_senha_hash(&self, id: i64, senha_hash: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afetadas = conn.execute(
            "UPDATE usuarios SET senha_hash = ?1, updated_at = ?2 WHERE id = ?3",
            params![senha_hash, Utc::now(), id],
        )?;
        if afetadas == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    /// Remove um usuário (exclusão definitiva)
    pub fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let afetadas = conn.execute("DELETE FROM usuarios WHERE id = ?1", params![id])?;
        Ok(afetadas > 0)
    }

    /// Busca por identificador (cpf OU email OU telefone)
    pub fn find_by_identifier(&self, identifier: &str) -> RepositoryResult<Option<Usuario>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, nome, cpf, email, telefone, senha_hash, role, created_at, updated_at
            FROM usuarios
            WHERE cpf = ?1 OR email = ?1 OR telefone = ?1
            "#,
        )?;
        let result = stmt.query_row(params![identifier], Self::map_row);
        match result {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Busca por id
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Usuario>> {
        let conn = self.get_conn()?;
        Self::find_with(&conn, id)
    }

    /// Listagem paginada com busca, filtro de role e ordenação
    pub fn list(&self, params_busca: &ParamsListagem) -> RepositoryResult<PaginaUsuarios> {
        let conn = self.get_conn()?;

        let page = params_busca.page.max(1);
        let limit = params_busca.limit.clamp(1, 100);
        let offset = (page - 1) * limit;

        let order_by = sanitizar_order_by(params_busca.sort_by.as_deref());
        let direction = sanitizar_sort_dir(params_busca.sort_dir.as_deref());

        let mut clausulas: Vec<&str> = Vec::new();
        let mut valores: Vec<Value> = Vec::new();

        if let Some(q) = params_busca.q.as_deref() {
            let q = q.trim();
            if !q.is_empty() {
                clausulas.push(
                    "(lower(nome) LIKE lower(?) OR cpf LIKE ? OR email LIKE ? OR telefone LIKE ?)",
                );
                let padrao = format!("%{}%", q);
                for _ in 0..4 {
                    valores.push(Value::Text(padrao.clone()));
                }
            }
        }
        if let Some(role) = params_busca.role.as_deref() {
            clausulas.push("role = ?");
            valores.push(Value::Text(role.to_string()));
        }

        let where_sql = if clausulas.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clausulas.join(" AND "))
        };

        // total (mesmos filtros, sem paginação)
        let count_sql = format!("SELECT COUNT(*) FROM usuarios {where_sql}");
        let total: i64 = conn.query_row(&count_sql, params_from_iter(valores.iter()), |row| {
            row.get(0)
        })?;

        // página
        let sql = format!(
            r#"
            SELECT id, nome, cpf, email, telefone, senha_hash, role, created_at, updated_at
            FROM usuarios
            {where_sql}
            ORDER BY {order_by} {direction}
            LIMIT ? OFFSET ?
            "#
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut todos = valores;
        todos.push(Value::Integer(limit));
        todos.push(Value::Integer(offset));
        let rows = stmt.query_map(params_from_iter(todos.iter()), Self::map_row)?;
        let items = rows.collect::<Result<Vec<_>, _>>()?;

        Ok(PaginaUsuarios {
            page,
            limit,
            total,
            items,
        })
    }

    // ==========================================
    // Auxiliares internos
    // ==========================================

    fn find_with(conn: &Connection, id: i64) -> RepositoryResult<Option<Usuario>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, nome, cpf, email, telefone, senha_hash, role, created_at, updated_at
            FROM usuarios WHERE id = ?1
            "#,
        )?;
        let result = stmt.query_row(params![id], Self::map_row);
        match result {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Usuario> {
        Ok(Usuario {
            id: row.get(0)?,
            nome: row.get(1)?,
            cpf: row.get(2)?,
            email: row.get(3)?,
            telefone: row.get(4)?,
            senha_hash: row.get(5)?,
            role: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn not_found(id: i64) -> RepositoryError {
        RepositoryError::NotFound {
            entity: "Usuario".to_string(),
            id: id.to_string(),
        }
    }
}
