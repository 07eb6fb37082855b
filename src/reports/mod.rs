use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use colcrack::key::{format_key, Key};
use colcrack::search::SearchResult;

pub fn print_crack_report(result: &SearchResult, evaluations: u64) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Transform").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Size"),
        Cell::new("Key").fg(Color::Green),
        Cell::new("Encode Key"),
        Cell::new("Candidates"),
        Cell::new("Scored"),
    ]);

    for i in [1, 2, 5, 6] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let score = result
        .score
        .map_or_else(|| "n/a".to_string(), |s| s.to_string());

    table.add_row(vec![
        Cell::new(result.transform).add_attribute(Attribute::Bold),
        Cell::new(score).fg(Color::Cyan),
        Cell::new(result.key_size),
        Cell::new(result.key_dump()).fg(Color::Green),
        Cell::new(format_key(&result.inverse_key())),
        Cell::new(result.candidates),
        Cell::new(evaluations),
    ]);
    println!("\n{}", table);
}

pub fn print_key_report(key: &Key) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut header = vec![Cell::new("Column").add_attribute(Attribute::Bold)];
    header.extend((0..key.size()).map(|c| Cell::new(c).set_alignment(CellAlignment::Center)));
    table.add_row(header);

    let inverse = key.inverted();
    for (label, row) in [("Key", key), ("Inverse", &inverse)] {
        let mut cells = vec![Cell::new(label).add_attribute(Attribute::Bold)];
        cells.extend(
            row.as_slice()
                .iter()
                .map(|&k| Cell::new(k).set_alignment(CellAlignment::Center)),
        );
        table.add_row(cells);
    }

    println!("\nKey: {} (inverse {})", key, inverse);
    println!("{}", table);
}

pub fn print_text(label: &str, bytes: &[u8]) {
    println!("\n{} ({} bytes):", label, bytes.len());
    println!("{}", String::from_utf8_lossy(bytes));
}
