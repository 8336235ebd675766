// ==========================================
// Backend de Medições - Testes da Camada de API
// ==========================================

mod test_helpers;

use medicao_api::api::{
    AuthApi, EmpresaApi, EquipamentoApi, FuncionarioApi, MedicaoApi, RelatorioApi, TokenPolicy,
    UsuarioApi,
};
use medicao_api::api::usuario_api::SENHA_PADRAO;
use medicao_api::domain::empresa::NovaEmpresa;
use medicao_api::domain::equipamento::EquipamentoRow;
use medicao_api::domain::funcionario::NovoFuncionario;
use medicao_api::domain::medicao::NovaMedicao;
use medicao_api::domain::usuario::NovoUsuario;
use medicao_api::logging;
use medicao_api::repository::{
    EmpresaRepository, EquipamentoRepository, FuncionarioRepository, MedicaoRepository,
    UsuarioRepository,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use test_helpers::conexao_compartilhada;

struct Apis {
    conn: Arc<Mutex<Connection>>,
    empresa: EmpresaApi,
    funcionario: FuncionarioApi,
    equipamento: EquipamentoApi,
    medicao: MedicaoApi,
    usuario: UsuarioApi,
    relatorio: RelatorioApi,
    auth: AuthApi,
}

fn montar_apis() -> Apis {
    let conn = conexao_compartilhada();
    let empresa_repo = Arc::new(EmpresaRepository::from_connection(conn.clone()));
    let funcionario_repo = Arc::new(FuncionarioRepository::from_connection(conn.clone()));
    let equipamento_repo = Arc::new(EquipamentoRepository::from_connection(conn.clone()));
    let medicao_repo = Arc::new(MedicaoRepository::from_connection(conn.clone()));
    let usuario_repo = Arc::new(UsuarioRepository::from_connection(conn.clone()));

    Apis {
        conn: conn.clone(),
        empresa: EmpresaApi::new(empresa_repo.clone()),
        funcionario: FuncionarioApi::new(conn.clone(), funcionario_repo.clone(), empresa_repo.clone()),
        equipamento: EquipamentoApi::new(conn.clone(), equipamento_repo.clone()),
        medicao: MedicaoApi::new(medicao_repo.clone()),
        usuario: UsuarioApi::new(usuario_repo.clone()),
        relatorio: RelatorioApi::new(
            empresa_repo,
            funcionario_repo,
            medicao_repo,
            equipamento_repo,
            usuario_repo.clone(),
        ),
        auth: AuthApi::new(usuario_repo, "token-de-teste"),
    }
}

fn novo_usuario(nome: &str, cpf: &str, email: &str, senha: &str) -> NovoUsuario {
    NovoUsuario {
        nome: nome.to_string(),
        cpf: cpf.to_string(),
        email: email.to_string(),
        telefone: None,
        senha: senha.to_string(),
        role: None,
    }
}

// ==========================================
// Autenticação
// ==========================================

#[test]
fn test_login_com_cpf_e_com_email() {
    logging::init_test();
    let apis = montar_apis();
    apis.usuario
        .create(&novo_usuario("Laura", "111.111.111-11", "laura@example.com", "s3nh4"))
        .unwrap();

    let resp = apis.auth.login("111.111.111-11", "s3nh4").unwrap();
    assert_eq!(resp.token, "token-de-teste");
    assert_eq!(resp.user.nome, "Laura");

    let resp = apis.auth.login("laura@example.com", "s3nh4").unwrap();
    assert_eq!(resp.user.email, "laura@example.com");
}

#[test]
fn test_login_recusado_com_mensagem_unica() {
    let apis = montar_apis();
    apis.usuario
        .create(&novo_usuario("Laura", "1", "l@example.com", "s3nh4"))
        .unwrap();

    // usuário inexistente e senha errada respondem igual
    let err1 = apis.auth.login("inexistente", "s3nh4").unwrap_err();
    let err2 = apis.auth.login("l@example.com", "errada").unwrap_err();
    assert_eq!(err1.to_string(), "Credenciais inválidas.");
    assert_eq!(err2.to_string(), "Credenciais inválidas.");
    assert_eq!(err1.status(), 401);
}

#[test]
fn test_usuario_nao_serializa_hash() {
    let apis = montar_apis();
    let usuario = apis
        .usuario
        .create(&novo_usuario("Laura", "1", "l@example.com", "s3nh4"))
        .unwrap();

    let json = serde_json::to_value(&usuario).unwrap();
    assert!(json.get("senha_hash").is_none());
    assert_eq!(json["nome"], "Laura");
}

#[test]
fn test_change_e_reset_de_senha() {
    let apis = montar_apis();
    let usuario = apis
        .usuario
        .create(&novo_usuario("Rui", "2", "rui@example.com", "original"))
        .unwrap();

    // senha atual errada
    let err = apis
        .usuario
        .change_password(usuario.id, "errada", "nova")
        .unwrap_err();
    assert_eq!(err.to_string(), "Senha atual incorreta.");
    assert_eq!(err.status(), 400);

    apis.usuario
        .change_password(usuario.id, "original", "nova")
        .unwrap();
    assert!(apis.auth.login("rui@example.com", "nova").is_ok());

    apis.usuario.reset_password(usuario.id).unwrap();
    assert!(apis.auth.login("rui@example.com", SENHA_PADRAO).is_ok());
    assert!(apis.auth.login("rui@example.com", "nova").is_err());
}

#[test]
fn test_cpf_duplicado_e_erro_de_entrada() {
    let apis = montar_apis();
    apis.usuario
        .create(&novo_usuario("A", "mesmo-cpf", "a@example.com", "x"))
        .unwrap();
    let err = apis
        .usuario
        .create(&novo_usuario("B", "mesmo-cpf", "b@example.com", "x"))
        .unwrap_err();
    assert_eq!(err.to_string(), "CPF ou e-mail já cadastrado.");
    assert_eq!(err.status(), 400);
}

// ==========================================
// CRUD com validação e 404
// ==========================================

#[test]
fn test_empresa_validacao_e_not_found() {
    let apis = montar_apis();

    let err = apis
        .empresa
        .create(&NovaEmpresa {
            nome: "".to_string(),
            cnpj: "1".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.status(), 400);

    let err = apis.empresa.get(42).unwrap_err();
    assert_eq!(err.to_string(), "Empresa não encontrada.");
    assert_eq!(err.status(), 404);
}

#[test]
fn test_medicao_exige_funcionario() {
    let apis = montar_apis();
    let err = apis.medicao.create(&NovaMedicao::default()).unwrap_err();
    assert_eq!(err.status(), 400);

    let err = apis.medicao.get(42).unwrap_err();
    assert_eq!(err.to_string(), "Medição não encontrada.");
}

#[tokio::test]
async fn test_import_exige_empresa_existente() {
    let apis = montar_apis();
    let err = apis
        .funcionario
        .import_by_empresa(42, "f.csv", b"nome\nMaria\n")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Empresa não encontrada.");
    assert_eq!(err.status(), 404);
}

#[tokio::test]
async fn test_import_via_api_devolve_o_resumo() {
    let apis = montar_apis();
    let empresa = apis
        .empresa
        .create(&NovaEmpresa {
            nome: "Alfa".to_string(),
            cnpj: "11.111.111/0001-11".to_string(),
        })
        .unwrap();

    let resumo = apis
        .funcionario
        .import_by_empresa(empresa.id, "f.csv", b"nome,matricula\nMaria,1001\n,\n")
        .await
        .unwrap();
    assert_eq!(resumo.inserted, 1);
    assert!(resumo.errors.is_empty());

    let lista = apis.funcionario.list_by_empresa(empresa.id).unwrap();
    assert_eq!(lista.len(), 1);
    assert_eq!(lista[0].nome, "Maria");
}

// ==========================================
// Relatório consolidado
// ==========================================

fn semear_relatorio(apis: &Apis) -> (i64, String) {
    let empresa = apis
        .empresa
        .create(&NovaEmpresa {
            nome: "Alfa".to_string(),
            cnpj: "11.111.111/0001-11".to_string(),
        })
        .unwrap();

    let funcionario = apis
        .funcionario
        .create(&NovoFuncionario {
            empresa_id: Some(empresa.id),
            setor: Some("Produção".to_string()),
            ghe: None,
            cargo: None,
            matricula: Some("1001".to_string()),
            nome: "Maria".to_string(),
        })
        .unwrap();

    let equipamento = apis
        .equipamento
        .create(&EquipamentoRow {
            tipo: "Dosímetro".to_string(),
            marca: "Instrutherm".to_string(),
            modelo: "DOS-600".to_string(),
            numero_serie: Some("S1".to_string()),
            data_ultima_calibracao: None,
            numero_certificado: None,
            data_vencimento: None,
        })
        .unwrap();

    let avaliador = apis
        .usuario
        .create(&novo_usuario("Avaliador", "av-1", "av@example.com", "x"))
        .unwrap();

    let mut medicao = NovaMedicao::default();
    medicao.funcionario_id = Some(funcionario.id);
    medicao.equipamento_id = Some(equipamento.id);
    medicao.avaliador_id = Some(avaliador.id);
    medicao.status = Some("concluida".to_string());
    apis.medicao.create(&medicao).unwrap();

    (funcionario.id, "1001".to_string())
}

#[test]
fn test_relatorio_por_matricula_completo() {
    let apis = montar_apis();
    let (_, matricula) = semear_relatorio(&apis);

    let relatorio = apis.relatorio.by_matricula(&matricula).unwrap();
    assert_eq!(relatorio.funcionario.nome, "Maria");
    assert_eq!(relatorio.empresa.nome, "Alfa");
    assert_eq!(relatorio.medicao.status.as_deref(), Some("concluida"));
    assert_eq!(
        relatorio.equipamento.as_ref().unwrap().modelo,
        "DOS-600"
    );
    assert_eq!(
        relatorio.avaliador.as_ref().unwrap().avaliador_email,
        "av@example.com"
    );
}

#[test]
fn test_relatorio_matricula_desconhecida() {
    let apis = montar_apis();
    let err = apis.relatorio.by_matricula("0000").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Nenhum funcionário encontrado com matrícula \"0000\"."
    );
    assert_eq!(err.status(), 404);
}

#[test]
fn test_relatorio_sem_medicao() {
    let apis = montar_apis();
    let empresa = apis
        .empresa
        .create(&NovaEmpresa {
            nome: "Alfa".to_string(),
            cnpj: "11.111.111/0001-11".to_string(),
        })
        .unwrap();
    let funcionario = apis
        .funcionario
        .create(&NovoFuncionario {
            empresa_id: Some(empresa.id),
            setor: None,
            ghe: None,
            cargo: None,
            matricula: Some("2001".to_string()),
            nome: "Sem Medição".to_string(),
        })
        .unwrap();

    let err = apis.relatorio.by_matricula("2001").unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "Nenhuma medição encontrada para o funcionário ID {}.",
            funcionario.id
        )
    );
}

#[test]
fn test_relatorio_com_equipamento_removido() {
    let apis = montar_apis();
    let (_, matricula) = semear_relatorio(&apis);

    // remove o equipamento referenciado; o vínculo fica ausente
    {
        let guard = apis.conn.lock().unwrap();
        guard
            .execute("UPDATE medicao SET equipamento_id = NULL", [])
            .unwrap();
    }

    let relatorio = apis.relatorio.by_matricula(&matricula).unwrap();
    assert!(relatorio.equipamento.is_none());
    assert!(relatorio.avaliador.is_some());
}

// ==========================================
// TokenPolicy
// ==========================================

#[test]
fn test_token_policy_integrado_com_config() {
    let policy = TokenPolicy::new("abc123");
    assert!(policy.authorize(Some("Bearer abc123")).is_ok());
    assert_eq!(
        policy.authorize(None).unwrap_err().to_string(),
        "Token inválido ou ausente."
    );
}
