use std::path::Path;

use sembairro::filter::{self, FilterError};

fn report_failure(err: &FilterError) {
    match err {
        FilterError::InputNotFound(path) => {
            println!("❌ Erro: Arquivo '{}' não encontrado!", path.display());
        }
        FilterError::ColumnNotFound {
            column, available, ..
        } => {
            println!("❌ Erro: Coluna '{column}' não encontrada no arquivo!");
            println!("💡 Colunas disponíveis: {available:?}");
        }
        FilterError::Workbook(err) => {
            println!("❌ Erro durante o processamento: {err:#}");
            println!("💡 Verifique se o arquivo está fechado e tente novamente.");
        }
    }
}

fn main() {
    println!("🚀 FILTRADOR DE REGISTROS SEM BAIRRO");
    println!("{}", "=".repeat(50));

    let input = Path::new("japeri.xlsx");
    let target_column = "BAIRRO";
    let output = Path::new("sem_bairro.xlsx");

    match filter::filter_missing(input, target_column, output) {
        Ok(summary) if summary.missing > 0 => {
            println!("\n🎉 Processo concluído com sucesso!");
            println!(
                "📄 Arquivo '{}' criado com {} registros.",
                output.display(),
                summary.missing
            );
        }
        Ok(_) => {
            println!("\n✨ Processo concluído! Nenhum registro sem bairro encontrado.");
        }
        Err(err) => {
            report_failure(&err);
            println!("\n❌ Processo falhou. Verifique os erros acima.");
            std::process::exit(1);
        }
    }
}
