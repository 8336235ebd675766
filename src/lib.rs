// ==========================================
// Backend de Medições Ocupacionais de Ruído
// ==========================================
// Cadastro de empresas, funcionários, equipamentos, medições e
// usuários, com importação de planilhas e relatório consolidado.
// Camadas: domain -> repository -> importer -> api.
// ==========================================

// ==========================================
// Infraestrutura
// ==========================================
pub mod config;
pub mod db;
pub mod logging;

// ==========================================
// Domínio e acesso a dados
// ==========================================
pub mod domain;
pub mod repository;

// ==========================================
// Importação de planilhas
// ==========================================
pub mod importer;

// ==========================================
// Camada de API
// ==========================================
pub mod api;

pub const APP_NAME: &str = "medicao-api";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
