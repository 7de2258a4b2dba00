use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use crate::dataset::{Dataset, Row};

pub const SHEET_NAME: &str = "Registros Sem Bairro";

/// Linhas de anotação no topo da planilha de saída; o cabeçalho da tabela
/// fica logo abaixo, e os dados a partir da linha seguinte.
const ANNOTATION_ROWS: usize = 3;

fn column_name(mut column: usize) -> String {
    // 1 -> A, 26 -> Z, 27 -> AA ...
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

fn cell_ref(col_1_based: usize, row_1_based: usize) -> String {
    format!("{}{}", column_name(col_1_based), row_1_based)
}

/// Largura de exibição: maior comprimento de texto + 2, limitado a [10, 50].
fn column_width(max_len: usize) -> f64 {
    (max_len + 2).clamp(10, 50) as f64
}

fn annotation_style() -> umya_spreadsheet::Style {
    let mut style = umya_spreadsheet::Style::default();
    style.get_font_mut().set_bold(true);
    style
        .get_fill_mut()
        .get_pattern_fill_mut()
        .set_pattern_type(umya_spreadsheet::structs::PatternValues::Solid);
    // argb em minúsculas: valores que coincidem com a paleta interna do umya
    // viram cor indexada e podem render errado; assim garante rgb="...".
    // ARGB: FF + E6E6FA (lavanda clara)
    style
        .get_fill_mut()
        .get_pattern_fill_mut()
        .get_foreground_color_mut()
        .set_argb("ffe6e6fa");
    style
        .get_fill_mut()
        .get_pattern_fill_mut()
        .get_background_color_mut()
        .set_argb("ffe6e6fa");
    style
}

/// Grava o subconjunto filtrado em `output`: três linhas de anotação em
/// negrito com fundo lavanda, cabeçalho original e uma linha por registro,
/// mantendo a ordem das colunas e sem coluna de índice.
pub fn write_report(
    dataset: &Dataset,
    filtered: &[(usize, &Row)],
    input: &Path,
    output: &Path,
) -> Result<()> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();
    sheet.set_name(SHEET_NAME);

    let style = annotation_style();
    let annotations = [
        format!("Registros sem bairro extraídos de: {}", input.display()),
        format!(
            "Data de extração: {}",
            Local::now().format("%d/%m/%Y %H:%M:%S")
        ),
        format!("Total de registros sem bairro: {}", filtered.len()),
    ];
    for (i, text) in annotations.iter().enumerate() {
        let addr = cell_ref(1, i + 1);
        sheet.get_cell_mut(addr.as_str()).set_value(text.as_str());
        sheet.get_cell_mut(addr.as_str()).set_style(style.clone());
    }

    for (col, name) in dataset.columns.iter().enumerate() {
        let addr = cell_ref(col + 1, ANNOTATION_ROWS + 1);
        sheet.get_cell_mut(addr.as_str()).set_value(name.as_str());
    }

    for (i, (_, row)) in filtered.iter().enumerate() {
        let sheet_row = ANNOTATION_ROWS + 2 + i;
        for (col, value) in row.iter().enumerate() {
            let addr = cell_ref(col + 1, sheet_row);
            match value {
                Some(v) => sheet.get_cell_mut(addr.as_str()).set_value(v.as_str()),
                None => sheet.get_cell_mut(addr.as_str()).set_value(""),
            };
        }
    }

    for (col, name) in dataset.columns.iter().enumerate() {
        let mut max_len = name.chars().count();
        for (_, row) in filtered {
            if let Some(value) = &row[col] {
                max_len = max_len.max(value.chars().count());
            }
        }
        let letter = column_name(col + 1);
        sheet
            .get_column_dimension_mut(letter.as_str())
            .set_width(column_width(max_len));
    }

    umya_spreadsheet::writer::xlsx::write(&book, output)
        .with_context(|| format!("não foi possível salvar o arquivo: {}", output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_clamps_to_bounds() {
        assert_eq!(column_width(3), 10.0);
        assert_eq!(column_width(20), 22.0);
        assert_eq!(column_width(60), 50.0);
    }

    #[test]
    fn column_names() {
        assert_eq!(column_name(1), "A");
        assert_eq!(column_name(26), "Z");
        assert_eq!(column_name(27), "AA");
        assert_eq!(cell_ref(2, 4), "B4");
    }
}
