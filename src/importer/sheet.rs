// ==========================================
// Backend de Medições - Leitura de Planilhas
// ==========================================
// Suporta: Excel (.xlsx/.xls) / CSV (.csv), a partir dos bytes do
// upload. As células preservam o tipo nativo (texto, número, data),
// porque a conversão de datas depende de saber se o valor veio como
// serial do Excel ou como texto.
// ==========================================

use crate::importer::error::ImportError;
use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::io::Cursor;

/// Célula de planilha com o tipo nativo preservado
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Valor como texto aparado; None para célula vazia
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Some(s.to_string())
                }
            }
            Cell::Number(n) => {
                // inteiro sem ".0", fracionário como veio
                if n.fract() == 0.0 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            Cell::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Cell::Bool(b) => Some(b.to_string()),
        }
    }
}

/// Planilha já separada em cabeçalho e linhas de dados
///
/// As linhas em branco NÃO são removidas aqui: a numeração de linha
/// reportada nos erros depende da posição original na planilha.
pub struct Planilha {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Lê os bytes do upload escolhendo o parser pela extensão do arquivo
///
/// `header_row` é o índice (base zero) da linha de cabeçalho; tudo
/// acima dela é descartado (planilhas de equipamentos têm linhas
/// decorativas antes do cabeçalho).
pub fn parse(nome_arquivo: &str, bytes: &[u8], header_row: usize) -> Result<Planilha, ImportError> {
    let ext = nome_arquivo
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" | "xls" => parse_xlsx(bytes, header_row),
        "csv" => parse_csv(bytes, header_row),
        _ => Err(ImportError::UnsupportedFormat(ext)),
    }
}

// ==========================================
// Excel
// ==========================================

pub fn parse_xlsx(bytes: &[u8], header_row: usize) -> Result<Planilha, ImportError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::ExcelParse(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    if sheet_names.is_empty() {
        return Err(ImportError::PlanilhaVazia);
    }
    let sheet_name = sheet_names[0].clone();
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::ExcelParse(e.to_string()))?;

    let mut linhas = range.rows().skip(header_row);
    let header = linhas.next().ok_or(ImportError::PlanilhaVazia)?;
    let headers: Vec<String> = header
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let rows = linhas
        .map(|linha| linha.iter().map(converter_celula).collect())
        .collect();

    Ok(Planilha { headers, rows })
}

fn converter_celula(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        // o serial é convertido em data pelo mapeador de linhas
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("{e:?}")),
    }
}

// ==========================================
// CSV
// ==========================================

pub fn parse_csv(bytes: &[u8], header_row: usize) -> Result<Planilha, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut todas: Vec<Vec<Cell>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ImportError::CsvParse(e.to_string()))?;
        todas.push(
            record
                .iter()
                .map(|campo| {
                    let campo = campo.trim();
                    if campo.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(campo.to_string())
                    }
                })
                .collect(),
        );
    }

    if todas.len() <= header_row {
        return Err(ImportError::PlanilhaVazia);
    }

    let mut resto = todas.split_off(header_row);
    let header = resto.remove(0);
    let headers: Vec<String> = header
        .iter()
        .map(|c| c.as_text().unwrap_or_default())
        .collect();

    Ok(Planilha {
        headers,
        rows: resto,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_com_cabecalho_na_primeira_linha() {
        let csv = b"nome,matricula,setor\nMaria Silva,1001,Producao\nJoao Souza,1002,Caldeiraria\n";
        let planilha = parse("funcionarios.csv", csv, 0).unwrap();

        assert_eq!(planilha.headers, vec!["nome", "matricula", "setor"]);
        assert_eq!(planilha.rows.len(), 2);
        assert_eq!(
            planilha.rows[0][0],
            Cell::Text("Maria Silva".to_string())
        );
    }

    #[test]
    fn test_csv_com_linhas_decorativas_antes_do_cabecalho() {
        let csv = b"Relatorio,,\n,,\nTipo,Marca,Modelo\nDosimetro,Instrutherm,DOS-600\n";
        let planilha = parse("equipamentos.csv", csv, 2).unwrap();

        assert_eq!(planilha.headers, vec!["Tipo", "Marca", "Modelo"]);
        assert_eq!(planilha.rows.len(), 1);
    }

    #[test]
    fn test_linha_em_branco_e_preservada_na_posicao() {
        let csv = b"nome\nMaria\n,\nJoao\n";
        let planilha = parse("f.csv", csv, 0).unwrap();

        // a linha em branco fica no vetor para manter a numeração
        assert_eq!(planilha.rows.len(), 3);
        assert!(planilha.rows[1].iter().all(Cell::is_empty));
    }

    #[test]
    fn test_extensao_nao_suportada() {
        let result = parse("dados.pdf", b"%PDF", 0);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_csv_sem_linha_de_cabecalho() {
        let result = parse("vazio.csv", b"", 0);
        assert!(matches!(result, Err(ImportError::PlanilhaVazia)));
    }

    #[test]
    fn test_as_text_normaliza_numero_inteiro() {
        assert_eq!(Cell::Number(1001.0).as_text(), Some("1001".to_string()));
        assert_eq!(Cell::Number(2.5).as_text(), Some("2.5".to_string()));
        assert_eq!(Cell::Text("  x  ".to_string()).as_text(), Some("x".to_string()));
        assert_eq!(Cell::Text("   ".to_string()).as_text(), None);
        assert_eq!(Cell::Empty.as_text(), None);
    }
}
