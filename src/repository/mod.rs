// ==========================================
// Backend de Medições - Camada de Repositório
// ==========================================
// Cada repositório encapsula uma conexão SQLite compartilhada
// (Arc<Mutex<Connection>>) e expõe operações de acesso a dados.
// As operações *_tx recebem uma transação aberta pelo chamador.
// ==========================================

pub mod empresa_repo;
pub mod equipamento_repo;
pub mod error;
pub mod funcionario_repo;
pub mod medicao_repo;
pub mod usuario_repo;

pub use empresa_repo::EmpresaRepository;
pub use equipamento_repo::EquipamentoRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use funcionario_repo::FuncionarioRepository;
pub use medicao_repo::MedicaoRepository;
pub use usuario_repo::UsuarioRepository;
