// ==========================================
// Backend de Medições - Camada de API
// ==========================================
// Valida entrada, delega aos repositórios/importadores e traduz
// erros para o conjunto fechado de ApiError. O envelope dá a forma
// final das respostas.
// ==========================================

pub mod auth;
pub mod empresa_api;
pub mod envelope;
pub mod equipamento_api;
pub mod error;
pub mod funcionario_api;
pub mod medicao_api;
pub mod relatorio_api;
pub mod usuario_api;

pub use auth::{AuthApi, LoginResponse, TokenPolicy};
pub use empresa_api::EmpresaApi;
pub use envelope::{responder, Envelope};
pub use equipamento_api::EquipamentoApi;
pub use error::{ApiError, ApiResult};
pub use funcionario_api::FuncionarioApi;
pub use medicao_api::MedicaoApi;
pub use relatorio_api::RelatorioApi;
pub use usuario_api::UsuarioApi;
