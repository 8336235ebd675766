// ==========================================
// Backend de Medições - Mapeamento de Linhas
// ==========================================
// O HeaderResolver traduz cabeçalhos da planilha (com seus apelidos
// aceitos) para índices de coluna UMA vez por importação; o laço de
// linhas só faz acesso posicional.
// ==========================================

use crate::importer::error::RowIssue;
use crate::importer::sheet::Cell;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

/// Epoch do serial de datas do Excel (serial 1 = 1900-01-01, com o
/// bug histórico do ano bissexto de 1900 já embutido)
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Tabela de apelidos: campo canônico -> cabeçalhos aceitos, em ordem
/// de preferência
pub type TabelaApelidos = &'static [(&'static str, &'static [&'static str])];

pub const APELIDOS_FUNCIONARIO: TabelaApelidos = &[
    ("id", &["id", "ID"]),
    ("nome", &["nome", "Nome"]),
    ("matricula", &["matricula", "Matrícula"]),
    ("setor", &["setor", "Setor"]),
    ("ghe", &["ghe", "GHE"]),
    ("cargo", &["cargo", "Cargo"]),
];

pub const APELIDOS_EQUIPAMENTO: TabelaApelidos = &[
    ("tipo", &["Tipo", "tipo"]),
    ("marca", &["Marca", "marca"]),
    ("modelo", &["Equipamentos/Modelos", "Modelo", "modelo"]),
    ("numero_serie", &["Nº Série", "Número de Série", "numero_serie"]),
    (
        "data_ultima_calibracao",
        &["Data da Última Calibração", "data_ultima_calibracao"],
    ),
    (
        "numero_certificado",
        &["Número do Certificado", "numero_certificado"],
    ),
    ("data_vencimento", &["Data de Vencimento", "data_vencimento"]),
];

/// Resolve apelidos de cabeçalho para índices de coluna
pub struct HeaderResolver {
    indices: HashMap<&'static str, usize>,
}

impl HeaderResolver {
    /// Percorre a tabela de apelidos e fixa, para cada campo canônico,
    /// a primeira coluna cujo cabeçalho casa com um dos apelidos
    pub fn resolve(headers: &[String], apelidos: TabelaApelidos) -> Self {
        let mut indices = HashMap::new();
        for (campo, nomes) in apelidos {
            let achado = nomes.iter().find_map(|nome| {
                headers.iter().position(|h| h.trim() == *nome)
            });
            if let Some(idx) = achado {
                indices.insert(*campo, idx);
            }
        }
        Self { indices }
    }

    fn celula<'a>(&self, linha: &'a [Cell], campo: &str) -> Option<&'a Cell> {
        self.indices.get(campo).and_then(|idx| linha.get(*idx))
    }

    /// Valor textual aparado; None quando a coluna não existe ou a
    /// célula está vazia
    pub fn get_string(&self, linha: &[Cell], campo: &str) -> Option<String> {
        self.celula(linha, campo).and_then(Cell::as_text)
    }

    /// Id numérico; texto não numérico conta como ausente
    pub fn get_id(&self, linha: &[Cell], campo: &str) -> Option<i64> {
        match self.celula(linha, campo)? {
            Cell::Number(n) => Some(*n as i64),
            Cell::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Data da célula, aceitando o tipo nativo, o serial do Excel e os
    /// formatos textuais usuais; célula vazia vira None
    pub fn get_date(&self, linha: &[Cell], campo: &str) -> Result<Option<NaiveDate>, RowIssue> {
        let celula = match self.celula(linha, campo) {
            Some(c) => c,
            None => return Ok(None),
        };
        match celula {
            Cell::Empty => Ok(None),
            Cell::Date(d) => Ok(Some(*d)),
            Cell::Number(n) => serial_para_data(*n)
                .map(Some)
                .ok_or_else(|| RowIssue::DataInvalida(n.to_string())),
            Cell::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                texto_para_data(s)
                    .map(Some)
                    .ok_or_else(|| RowIssue::DataInvalida(s.to_string()))
            }
            Cell::Bool(b) => Err(RowIssue::DataInvalida(b.to_string())),
        }
    }
}

/// Converte o serial de data do Excel (dias desde 1899-12-30)
fn serial_para_data(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let (a, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(a, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

fn texto_para_data(texto: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(texto, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(texto, "%d/%m/%Y") {
        return Some(d);
    }
    // prefixo de data em timestamps ISO ("2024-03-15T00:00:00.000Z")
    if texto.len() >= 10 {
        if let Ok(d) = NaiveDate::parse_from_str(&texto[..10], "%Y-%m-%d") {
            return Some(d);
        }
    }
    None
}
