// ==========================================
// Backend de Medições - Testes de Importação de Equipamentos
// ==========================================
// A planilha padrão tem cinco linhas decorativas antes do cabeçalho;
// a numeração dos erros começa na linha visível 6. Importação de
// equipamentos só insere: reimportar duplica os registros.
// ==========================================

mod test_helpers;

use medicao_api::importer::equipamento_importer::EquipamentoImporter;
use medicao_api::importer::ImportadorPlanilha;
use medicao_api::logging;
use test_helpers::{conexao_compartilhada, contar};

const DECORACAO: &str = "Empresa XYZ,,,,,,\n\
                         Relatório de Equipamentos,,,,,,\n\
                         ,,,,,,\n\
                         Emitido em 2024,,,,,,\n\
                         ,,,,,,\n";

fn planilha(linhas_de_dados: &str) -> Vec<u8> {
    let cabecalho = "Tipo,Marca,Equipamentos/Modelos,Nº Série,Data da Última Calibração,Número do Certificado,Data de Vencimento\n";
    format!("{DECORACAO}{cabecalho}{linhas_de_dados}").into_bytes()
}

#[tokio::test]
async fn test_importa_com_cabecalho_na_sexta_linha() {
    logging::init_test();
    let conn = conexao_compartilhada();

    let bytes = planilha(
        "Dosímetro,Instrutherm,DOS-600,S123,15/03/2024,CERT-1,2025-03-15\n\
         Calibrador,Brüel & Kjær,4231,S456,2024-01-10,CERT-2,\n",
    );

    let importer = EquipamentoImporter::from_connection(conn.clone());
    let resumo = importer.importar("equipamentos.csv", &bytes).await.unwrap();

    assert_eq!(resumo.inserted, 2);
    assert_eq!(resumo.updated, 0);
    assert!(resumo.errors.is_empty());

    let (calibracao, vencimento): (String, String) = {
        let guard = conn.lock().unwrap();
        guard
            .query_row(
                "SELECT data_ultima_calibracao, data_vencimento
                   FROM equipamentos WHERE numero_serie = 'S123'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap()
    };
    // "15/03/2024" e "2025-03-15" convergem para o mesmo formato
    assert_eq!(calibracao, "2024-03-15");
    assert_eq!(vencimento, "2025-03-15");
}

#[tokio::test]
async fn test_reimportar_duplica_porque_so_insere() {
    let conn = conexao_compartilhada();
    let bytes = planilha(
        "Dosímetro,A,M1,,,,\n\
         Dosímetro,B,M2,,,,\n\
         Dosímetro,C,M3,,,,\n\
         Dosímetro,D,M4,,,,\n\
         Dosímetro,E,M5,,,,\n",
    );

    let importer = EquipamentoImporter::from_connection(conn.clone());
    importer.importar("e.csv", &bytes).await.unwrap();
    assert_eq!(contar(&conn, "equipamentos"), 5);

    importer.importar("e.csv", &bytes).await.unwrap();
    assert_eq!(contar(&conn, "equipamentos"), 10);
}

#[tokio::test]
async fn test_data_invalida_e_campos_obrigatorios_por_linha() {
    let conn = conexao_compartilhada();
    let bytes = planilha(
        "Dosímetro,Instrutherm,DOS-500,,vencido,,\n\
         ,SemTipo,M9,,,,\n\
         Dosímetro,Ok,M10,,,,\n",
    );

    let importer = EquipamentoImporter::from_connection(conn.clone());
    let resumo = importer.importar("e.csv", &bytes).await.unwrap();

    assert_eq!(resumo.inserted, 1);
    assert_eq!(resumo.errors.len(), 2);

    // primeira linha de dados é a visível 6
    assert_eq!(resumo.errors[0].row, 6);
    assert_eq!(resumo.errors[0].message, "Data inválida: \"vencido\"");
    assert_eq!(resumo.errors[1].row, 7);
    assert_eq!(
        resumo.errors[1].message,
        "Campos \"Tipo\", \"Marca\" e \"Modelo\" são obrigatórios"
    );
}
