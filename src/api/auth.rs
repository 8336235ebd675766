// ==========================================
// Backend de Medições - Autenticação
// ==========================================
// Token estático de API (vindo da configuração) + senhas com hash
// Argon2. O TokenPolicy aceita o token puro ou no esquema Bearer.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::usuario::Usuario;
use crate::repository::usuario_repo::UsuarioRepository;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

const MSG_TOKEN_INVALIDO: &str = "Token inválido ou ausente.";
const MSG_CREDENCIAIS_INVALIDAS: &str = "Credenciais inválidas.";

// ==========================================
// Hash de senha
// ==========================================

/// Gera o hash Argon2 de uma senha em texto claro
pub fn hash_senha(senha: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(senha.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ApiError::Internal(format!("Falha ao gerar hash de senha: {e}")))
}

/// Confere uma senha contra o hash armazenado; hash malformado conta
/// como senha errada
pub fn verificar_senha(senha: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(senha.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("hash de senha malformado no banco: {}", e);
            false
        }
    }
}

// ==========================================
// TokenPolicy - guarda de acesso
// ==========================================

/// Valida o token de API presente no cabeçalho Authorization
pub struct TokenPolicy {
    token: String,
}

impl TokenPolicy {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Autoriza o valor do cabeçalho; aceita "<token>" ou
    /// "Bearer <token>"
    pub fn authorize(&self, header: Option<&str>) -> ApiResult<()> {
        let valor = header.unwrap_or("").trim();
        let token = valor.strip_prefix("Bearer ").unwrap_or(valor).trim();
        if !token.is_empty() && token == self.token {
            Ok(())
        } else {
            Err(ApiError::Auth(MSG_TOKEN_INVALIDO.to_string()))
        }
    }
}

// ==========================================
// AuthApi - login
// ==========================================

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Usuario,
}

pub struct AuthApi {
    usuario_repo: Arc<UsuarioRepository>,
    api_token: String,
}

impl AuthApi {
    pub fn new(usuario_repo: Arc<UsuarioRepository>, api_token: impl Into<String>) -> Self {
        Self {
            usuario_repo,
            api_token: api_token.into(),
        }
    }

    /// Login por cpf, e-mail ou telefone
    ///
    /// Usuário inexistente e senha errada produzem a mesma resposta,
    /// sem revelar qual dos dois falhou.
    pub fn login(&self, identifier: &str, senha: &str) -> ApiResult<LoginResponse> {
        let identifier = identifier.trim();
        if identifier.is_empty() || senha.is_empty() {
            return Err(ApiError::Auth(MSG_CREDENCIAIS_INVALIDAS.to_string()));
        }

        let usuario = self
            .usuario_repo
            .find_by_identifier(identifier)?
            .ok_or_else(|| ApiError::Auth(MSG_CREDENCIAIS_INVALIDAS.to_string()))?;

        if !verificar_senha(senha, &usuario.senha_hash) {
            return Err(ApiError::Auth(MSG_CREDENCIAIS_INVALIDAS.to_string()));
        }

        Ok(LoginResponse {
            token: self.api_token.clone(),
            user: usuario,
        })
    }
}
