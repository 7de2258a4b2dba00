use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::dataset::{Dataset, Row};
use crate::output;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("arquivo '{}' não encontrado", .0.display())]
    InputNotFound(PathBuf),
    #[error("coluna '{column}' não encontrada no arquivo")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
        /// Total de linhas lidas antes da falha.
        total: usize,
    },
    #[error(transparent)]
    Workbook(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct Summary {
    pub total: usize,
    pub missing: usize,
}

/// Contagens independentes sobre a coluna alvo, calculadas sobre a tabela
/// inteira antes da filtragem. São apenas diagnóstico; o filtro reavalia a
/// condição por conta própria.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ColumnStats {
    pub non_null: usize,
    pub null: usize,
    pub empty: usize,
    pub whitespace: usize,
}

pub fn column_stats(dataset: &Dataset, col: usize) -> ColumnStats {
    let mut stats = ColumnStats::default();
    for row in &dataset.rows {
        match row[col].as_deref() {
            None => stats.null += 1,
            Some(value) => {
                stats.non_null += 1;
                if value.is_empty() {
                    stats.empty += 1;
                }
                if value.trim().is_empty() {
                    stats.whitespace += 1;
                }
            }
        }
    }
    stats
}

/// Um valor conta como ausente se for nulo, string vazia exata ou vazio após
/// `trim`. O nulo é testado antes de qualquer coerção para texto.
pub fn is_missing(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(s) => s.is_empty() || s.trim().is_empty(),
    }
}

/// Rotina principal: carrega `input`, separa os registros cuja coluna
/// `target_column` está sem valor e grava o resultado anotado em
/// `output_path`. Sem registros ausentes, nada é gravado.
pub fn filter_missing(
    input: &Path,
    target_column: &str,
    output_path: &Path,
) -> Result<Summary, FilterError> {
    println!("🔍 Iniciando análise do arquivo: {}", input.display());
    println!("{}", "=".repeat(60));

    if !input.exists() {
        return Err(FilterError::InputNotFound(input.to_path_buf()));
    }

    println!("📂 Carregando arquivo Excel...");
    let dataset = Dataset::load(input)?;
    let total = dataset.len();

    println!("✅ Arquivo carregado com sucesso!");
    println!("📊 Total de registros no arquivo: {total}");
    println!("📋 Colunas encontradas: {:?}", dataset.columns);

    let Some(target) = dataset.column_index(target_column) else {
        return Err(FilterError::ColumnNotFound {
            column: target_column.to_string(),
            available: dataset.columns.clone(),
            total,
        });
    };

    println!("\n🔎 Analisando coluna '{target_column}'...");
    let stats = column_stats(&dataset, target);
    println!("📈 Estatísticas da coluna '{target_column}':");
    println!("   • Registros não nulos: {}", stats.non_null);
    println!("   • Registros nulos: {}", stats.null);
    println!("   • Registros com string vazia: {}", stats.empty);
    println!("   • Registros só com espaços: {}", stats.whitespace);

    let filtered: Vec<(usize, &Row)> = dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| is_missing(row[target].as_deref()))
        .collect();
    let missing = filtered.len();

    println!("📊 Resultado da filtragem:");
    println!("   • Total de registros: {total}");
    println!("   • Registros SEM {target_column}: {missing}");
    println!("   • Registros COM {target_column}: {}", total - missing);

    if missing == 0 {
        println!("🎉 Ótima notícia! Não há registros sem {target_column} no arquivo.");
        return Ok(Summary { total, missing: 0 });
    }

    print_sample(&dataset, target, &filtered);

    println!("\n💾 Salvando arquivo: {}...", output_path.display());
    output::write_report(&dataset, &filtered, input, output_path)?;

    let location = std::path::absolute(output_path).unwrap_or_else(|_| output_path.to_path_buf());
    println!("✅ Arquivo salvo com sucesso!");
    println!("📁 Localização: {}", location.display());
    println!("📊 Aba criada: '{}'", output::SHEET_NAME);
    println!("🔢 Registros salvos: {missing}");

    println!("\n🎯 RESUMO FINAL:");
    println!("{}", "=".repeat(40));
    println!("📂 Arquivo origem: {}", input.display());
    println!("📂 Arquivo destino: {}", output_path.display());
    println!("📊 Total de registros: {total}");
    println!("❌ Registros sem {target_column}: {missing}");
    println!("✅ Registros com {target_column}: {}", total - missing);
    println!(
        "📈 Taxa de completude: {:.1}%",
        (total - missing) as f64 / total as f64 * 100.0
    );

    Ok(Summary { total, missing })
}

fn print_sample(dataset: &Dataset, target: usize, filtered: &[(usize, &Row)]) {
    println!("\n👁️ Amostra dos registros sem valor:");
    println!("{}", "=".repeat(50));

    for (i, &(orig, row)) in filtered.iter().take(5).enumerate() {
        // +2: o cabeçalho ocupa a linha 1 da planilha original
        println!("📄 Registro {} (linha {}):", i + 1, orig + 2);

        let mut important: Vec<String> = Vec::new();
        for (col, name) in dataset.columns.iter().enumerate() {
            if col == target {
                continue;
            }
            if let Some(value) = &row[col] {
                if !value.trim().is_empty() {
                    important.push(format!("{name}: {value}"));
                }
            }
        }
        if !important.is_empty() {
            println!("   {}", important[..important.len().min(3)].join(" | "));
        }

        match &row[target] {
            None => println!("   {}: [NULO]", dataset.columns[target]),
            Some(s) if s.is_empty() => println!("   {}: [VAZIO]", dataset.columns[target]),
            // valor só de espaços cai aqui e sai impresso literalmente
            Some(s) => println!("   {}: ['{s}']", dataset.columns[target]),
        }
        println!();
    }

    if filtered.len() > 5 {
        println!("... e mais {} registros.", filtered.len() - 5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(values: Vec<Option<&str>>) -> Dataset {
        Dataset {
            columns: vec!["ENDERECO".to_string(), "BAIRRO".to_string()],
            rows: values
                .into_iter()
                .enumerate()
                .map(|(i, v)| vec![Some(format!("Rua {i}")), v.map(str::to_string)])
                .collect(),
        }
    }

    #[test]
    fn missing_predicate() {
        assert!(is_missing(None));
        assert!(is_missing(Some("")));
        assert!(is_missing(Some("   ")));
        assert!(!is_missing(Some(" Centro ")));
        assert!(!is_missing(Some("Centro")));
    }

    #[test]
    fn stats_over_mixed_column() {
        let ds = dataset(vec![
            Some("Centro"),
            None,
            Some(""),
            Some("  "),
            Some(" Vila Nova "),
        ]);
        let stats = column_stats(&ds, 1);
        assert_eq!(stats.non_null, 4);
        assert_eq!(stats.null, 1);
        assert_eq!(stats.empty, 1);
        // string vazia também conta como só-espaços, como no diagnóstico original
        assert_eq!(stats.whitespace, 2);
    }

    #[test]
    fn missing_equals_total_minus_with_value() {
        let ds = dataset(vec![Some("Centro"), None, Some("   "), Some("Glória"), Some("")]);
        let missing = ds
            .rows
            .iter()
            .filter(|row| is_missing(row[1].as_deref()))
            .count();
        let with_value = ds
            .rows
            .iter()
            .filter(|row| !is_missing(row[1].as_deref()))
            .count();
        assert_eq!(missing, 3);
        assert_eq!(missing, ds.len() - with_value);
    }
}
