use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Reader, open_workbook_auto};

/// Uma linha da tabela; `None` representa célula realmente vazia (nula),
/// `Some` o texto renderizado da célula.
pub type Row = Vec<Option<String>>;

/// Tabela carregada por inteiro em memória: cabeçalho + linhas, na ordem
/// original do arquivo.
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

fn render_data(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 {
                format!("{:.0}", n)
            } else {
                n.to_string()
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("{e:?}"),
        Data::DateTime(f) => f.to_string(),
        other => format!("{other:?}"),
    }
}

fn cell_value(cell: Option<&Data>) -> Option<String> {
    match cell {
        None | Some(Data::Empty) => None,
        Some(data) => Some(render_data(data)),
    }
}

impl Dataset {
    /// Carrega a primeira planilha do arquivo. A primeira linha é o
    /// cabeçalho; nomes de coluna chegam às vezes com espaços acidentais e
    /// são normalizados com `trim`.
    pub fn load(path: &Path) -> Result<Dataset> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("não foi possível abrir o arquivo: {}", path.display()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("a pasta de trabalho não possui planilhas"))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("não foi possível ler a planilha: {sheet_name}"))?;

        let (height, width) = range.get_size();
        if height == 0 {
            return Ok(Dataset {
                columns: Vec::new(),
                rows: Vec::new(),
            });
        }

        let columns: Vec<String> = (0..width)
            .map(|col| {
                cell_value(range.get((0, col)))
                    .unwrap_or_default()
                    .trim()
                    .to_string()
            })
            .collect();

        let rows: Vec<Row> = (1..height)
            .map(|row| (0..width).map(|col| cell_value(range.get((row, col)))).collect())
            .collect();

        Ok(Dataset { columns, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_integral_float_without_fraction() {
        assert_eq!(render_data(&Data::Float(42.0)), "42");
        assert_eq!(render_data(&Data::Float(3.5)), "3.5");
    }

    #[test]
    fn empty_cell_is_null() {
        assert_eq!(cell_value(None), None);
        assert_eq!(cell_value(Some(&Data::Empty)), None);
        assert_eq!(
            cell_value(Some(&Data::String("Centro".into()))),
            Some("Centro".to_string())
        );
    }
}
