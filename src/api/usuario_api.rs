// ==========================================
// Backend de Medições - API de Usuários
// ==========================================
// A senha nunca sai desta camada em texto claro nem como hash: o
// campo senha_hash é marcado com skip_serializing no domínio.
// ==========================================

use crate::api::auth::{hash_senha, verificar_senha};
use crate::api::error::{ApiError, ApiResult};
use crate::domain::usuario::{
    AtualizaUsuario, NovoUsuario, PaginaUsuarios, ParamsListagem, Usuario,
};
use crate::repository::error::RepositoryError;
use crate::repository::usuario_repo::UsuarioRepository;
use std::sync::Arc;
use tracing::info;

/// Senha aplicada pelo reset administrativo
pub const SENHA_PADRAO: &str = "123mudar";

pub struct UsuarioApi {
    repo: Arc<UsuarioRepository>,
}

impl UsuarioApi {
    pub fn new(repo: Arc<UsuarioRepository>) -> Self {
        Self { repo }
    }

    pub fn create(&self, dados: &NovoUsuario) -> ApiResult<Usuario> {
        if dados.nome.trim().is_empty()
            || dados.cpf.trim().is_empty()
            || dados.email.trim().is_empty()
            || dados.senha.is_empty()
        {
            return Err(ApiError::Validation(
                "Campos \"nome\", \"cpf\", \"email\" e \"senha\" são obrigatórios.".to_string(),
            ));
        }

        let senha_hash = hash_senha(&dados.senha)?;
        let role = dados.role.as_deref().unwrap_or("user");
        let usuario = self
            .repo
            .create(
                dados.nome.trim(),
                dados.cpf.trim(),
                dados.email.trim(),
                dados.telefone.as_deref(),
                &senha_hash,
                role,
            )
            .map_err(mapear_duplicidade)?;
        info!("usuário criado: id={} role={}", usuario.id, usuario.role);
        Ok(usuario)
    }

    pub fn update(&self, id: i64, dados: &AtualizaUsuario) -> ApiResult<Usuario> {
        if dados.nome.trim().is_empty() || dados.cpf.trim().is_empty() {
            return Err(ApiError::Validation(
                "Campos \"nome\" e \"cpf\" são obrigatórios.".to_string(),
            ));
        }
        self.repo.update(id, dados).map_err(mapear_duplicidade)
    }

    pub fn delete(&self, id: i64) -> ApiResult<()> {
        if !self.repo.delete(id)? {
            return Err(ApiError::NotFound("Usuário não encontrado.".to_string()));
        }
        info!("usuário removido: id={}", id);
        Ok(())
    }

    pub fn get(&self, id: i64) -> ApiResult<Usuario> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("Usuário não encontrado.".to_string()))
    }

    /// Listagem paginada (busca, filtro de role, ordenação)
    pub fn list(&self, params: &ParamsListagem) -> ApiResult<PaginaUsuarios> {
        Ok(self.repo.list(params)?)
    }

    /// Troca de senha pelo próprio usuário (exige a senha atual)
    pub fn change_password(
        &self,
        id: i64,
        senha_atual: &str,
        nova_senha: &str,
    ) -> ApiResult<()> {
        if nova_senha.is_empty() {
            return Err(ApiError::Validation(
                "Campo \"nova_senha\" é obrigatório.".to_string(),
            ));
        }
        let usuario = self.get(id)?;
        if !verificar_senha(senha_atual, &usuario.senha_hash) {
            return Err(ApiError::Validation("Senha atual incorreta.".to_string()));
        }
        let novo_hash = hash_senha(nova_senha)?;
        self.repo.set_senha_hash(id, &novo_hash)?;
        info!("senha alterada: usuário id={}", id);
        Ok(())
    }

    /// Reset administrativo: volta a senha para o padrão
    pub fn reset_password(&self, id: i64) -> ApiResult<()> {
        let novo_hash = hash_senha(SENHA_PADRAO)?;
        self.repo.set_senha_hash(id, &novo_hash)?;
        info!("senha redefinida para o padrão: usuário id={}", id);
        Ok(())
    }
}

/// cpf e e-mail têm UNIQUE no banco; a violação vira erro de entrada
fn mapear_duplicidade(e: RepositoryError) -> ApiError {
    match e {
        RepositoryError::UniqueConstraintViolation(_) => {
            ApiError::Validation("CPF ou e-mail já cadastrado.".to_string())
        }
        outro => outro.into(),
    }
}
