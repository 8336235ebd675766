// ==========================================
// Backend de Medições - Envelope de Resposta
// ==========================================
// Toda resposta segue o mesmo contrato:
//   sucesso: {"success": true,  "data": ..., "message": ...}
//   falha:   {"success": false, "message": ..., "errors": [...]}
// ==========================================

use crate::api::error::ApiResult;
use crate::importer::batch_runner::RowError;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<RowError>>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn fail_with_errors(message: impl Into<String>, errors: Vec<RowError>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors: Some(errors),
        }
    }
}

/// Converte o resultado de uma operação de API no par (status HTTP,
/// envelope serializável)
pub fn responder<T: Serialize>(result: ApiResult<T>) -> (u16, Envelope<T>) {
    match result {
        Ok(data) => (200, Envelope::ok(data)),
        Err(err) => (err.status(), Envelope::fail(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;

    #[test]
    fn test_envelope_de_sucesso_omite_campos_vazios() {
        let json = serde_json::to_value(Envelope::ok(vec![1, 2, 3])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json.get("message").is_none());
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_envelope_de_falha() {
        let json =
            serde_json::to_value(Envelope::<()>::fail("Empresa não encontrada.")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Empresa não encontrada.");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_responder_mapeia_status() {
        let (status, env) = responder::<()>(Err(ApiError::NotFound(
            "Funcionário não encontrado.".to_string(),
        )));
        assert_eq!(status, 404);
        assert!(!env.success);

        let (status, _) = responder(Ok(42));
        assert_eq!(status, 200);
    }

    #[test]
    fn test_envelope_com_erros_de_linha() {
        let env = Envelope::<()>::fail_with_errors(
            "Importação com erros",
            vec![RowError {
                row: 3,
                message: "Campo \"nome\" é obrigatório".to_string(),
            }],
        );
        let json = serde_json::to_value(env).unwrap();
        assert_eq!(json["errors"][0]["row"], 3);
    }
}
