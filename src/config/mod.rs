// ==========================================
// Backend de Medições - Configuração
// ==========================================
// Fonte: variáveis de ambiente, com defaults utilizáveis em
// desenvolvimento. O token de API é o segredo compartilhado exigido
// pelas rotas protegidas (comparação explícita, sem estado global).
// ==========================================

use std::env;
use std::path::PathBuf;

/// Nome do arquivo de banco padrão dentro do diretório de dados
const DEFAULT_DB_FILE: &str = "medicao.db";

/// Configuração da aplicação
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Caminho do arquivo SQLite
    pub db_path: String,

    /// Token estático de API (rotas protegidas)
    pub api_token: String,
}

impl AppConfig {
    /// Carrega a configuração do ambiente
    ///
    /// # Variáveis
    /// - MEDICAO_DB_PATH: caminho do banco (padrão: diretório de dados do usuário)
    /// - API_TOKEN: segredo compartilhado (padrão: vazio, nega tudo)
    pub fn from_env() -> Self {
        let db_path = env::var("MEDICAO_DB_PATH").unwrap_or_else(|_| default_db_path());
        let api_token = env::var("API_TOKEN").unwrap_or_default();

        Self { db_path, api_token }
    }
}

/// Caminho padrão do banco: <dados do usuário>/medicao-api/medicao.db
pub fn default_db_path() -> String {
    let mut base: PathBuf = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push("medicao-api");
    base.push(DEFAULT_DB_FILE);
    base.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_db_path_termina_com_arquivo() {
        assert!(default_db_path().ends_with(DEFAULT_DB_FILE));
    }
}
