use anyhow::Result;

fn main() -> Result<()> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();

    sheet.get_cell_mut("A1").set_value("ENDERECO");
    sheet.get_cell_mut("B1").set_value("CIDADE");
    // espaço proposital no cabeçalho para exercitar a normalização
    sheet.get_cell_mut("C1").set_value("BAIRRO ");

    let rows = [
        ("Rua das Flores, 10", "Japeri", Some("Centro")),
        ("Av. Brasil, 2000", "Japeri", None),
        ("Rua Sete, 45", "Japeri", Some("   ")),
        ("Travessa da Paz, 3", "Japeri", Some("Engenheiro Pedreira")),
    ];
    for (i, (endereco, cidade, bairro)) in rows.iter().enumerate() {
        let row = i + 2;
        sheet
            .get_cell_mut(format!("A{row}").as_str())
            .set_value(*endereco);
        sheet
            .get_cell_mut(format!("B{row}").as_str())
            .set_value(*cidade);
        if let Some(bairro) = bairro {
            sheet
                .get_cell_mut(format!("C{row}").as_str())
                .set_value(*bairro);
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, "japeri.xlsx")?;
    println!("Gravado japeri.xlsx");
    Ok(())
}
