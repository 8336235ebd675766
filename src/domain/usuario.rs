// ==========================================
// Backend de Medições - Entidade Usuário
// ==========================================
// Usuários do sistema (avaliadores e administradores).
// O hash de senha nunca é serializado em respostas.
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Usuário/avaliador
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub email: String,
    pub telefone: Option<String>,
    /// Hash argon2 da senha; omitido em toda resposta JSON
    #[serde(skip_serializing, default)]
    pub senha_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload de criação de usuário
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovoUsuario {
    pub nome: String,
    pub cpf: String,
    pub email: String,
    pub telefone: Option<String>,
    pub senha: String,
    pub role: Option<String>,
}

/// Payload de atualização (não altera a senha)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtualizaUsuario {
    pub nome: String,
    pub cpf: String,
    pub email: String,
    pub telefone: Option<String>,
    pub role: Option<String>,
}

/// Parâmetros da listagem paginada
#[derive(Debug, Clone)]
pub struct ParamsListagem {
    pub page: i64,
    pub limit: i64,
    pub q: Option<String>,
    pub role: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl Default for ParamsListagem {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            q: None,
            role: None,
            sort_by: None,
            sort_dir: None,
        }
    }
}

/// Página de usuários
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginaUsuarios {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub items: Vec<Usuario>,
}
