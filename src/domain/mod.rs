// ==========================================
// Backend de Medições - Camada de Domínio
// ==========================================
// Registros planos serializáveis; o banco relacional é a cópia
// autoritativa, nada aqui guarda estado em memória.
// ==========================================

pub mod empresa;
pub mod equipamento;
pub mod funcionario;
pub mod medicao;
pub mod relatorio;
pub mod usuario;

pub use empresa::{Empresa, NovaEmpresa};
pub use equipamento::{Equipamento, EquipamentoRow};
pub use funcionario::{Funcionario, FuncionarioComStatus, FuncionarioRow, NovoFuncionario};
pub use medicao::{Medicao, NovaMedicao};
pub use relatorio::Relatorio;
pub use usuario::{AtualizaUsuario, NovoUsuario, PaginaUsuarios, ParamsListagem, Usuario};
