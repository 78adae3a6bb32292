// src/db/registry_repo.rs

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::{common::error::AppError, models::registry::RegistryRecord};

pub const REGISTO_COLUMN: &str = "Registo";
pub const NOME_COLUMN: &str = "Nome";

/// Nome devolvido quando o código de registo não existe.
pub const UNKNOWN_NAME: &str = "Desconhecido";

// A tabela dos alojamentos, carregada uma vez no arranque e só lida depois.
#[derive(Debug, Clone, Default)]
pub struct RegistryRepository {
    records: Vec<RegistryRecord>,
}

impl RegistryRepository {
    pub fn from_records(records: Vec<RegistryRecord>) -> Self {
        Self { records }
    }

    /// Carrega a folha de cálculo (`.xlsx`, `.xls`, `.ods`) ou um `.csv`.
    /// A primeira linha é o cabeçalho; só as colunas `Registo` e `Nome` contam.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::Registry(format!(
                "Ficheiro '{}' não encontrado.",
                path.display()
            )));
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        let records = if is_csv {
            Self::read_csv(path)?
        } else {
            Self::read_workbook(path)?
        };

        Ok(Self { records })
    }

    fn read_workbook(path: &Path) -> Result<Vec<RegistryRecord>, AppError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::Registry("A folha de cálculo não tem folhas.".to_string()))??;

        let mut rows = range.rows();
        let header: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(|cell| cell_text(cell).trim().to_string()).collect())
            .unwrap_or_default();

        let registo_idx = column_index(&header, REGISTO_COLUMN)?;
        let nome_idx = column_index(&header, NOME_COLUMN)?;

        let records = rows
            .map(|row| {
                let cell = |idx: usize| row.get(idx).map(cell_text).unwrap_or_default();
                RegistryRecord::new(cell(registo_idx), cell(nome_idx))
            })
            .collect();

        Ok(records)
    }

    fn read_csv(path: &Path) -> Result<Vec<RegistryRecord>, AppError> {
        let mut reader = csv::Reader::from_path(path)?;
        let header: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let registo_idx = column_index(&header, REGISTO_COLUMN)?;
        let nome_idx = column_index(&header, NOME_COLUMN)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let cell = |idx: usize| row.get(idx).unwrap_or_default().to_string();
            records.push(RegistryRecord::new(cell(registo_idx), cell(nome_idx)));
        }

        Ok(records)
    }

    /// Nome do primeiro registo cujo código (sem espaços nas pontas) coincide.
    pub fn find_name(&self, registo: &str) -> String {
        let wanted = registo.trim();
        self.records
            .iter()
            .find(|record| record.registo.trim() == wanted)
            .map(|record| record.nome.clone())
            .unwrap_or_else(|| UNKNOWN_NAME.to_string())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn column_index(header: &[String], column: &str) -> Result<usize, AppError> {
    header
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| AppError::Registry(format!("Coluna '{}' não encontrada.", column)))
}

// Converte uma célula em texto. Números inteiros guardados como float
// (o Excel guarda 12345 como 12345.0) saem sem parte decimal.
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}
