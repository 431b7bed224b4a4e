use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hrprep_cli::pipeline::RunResult;
use hrprep_model::{Classification, ColumnKind, ColumnRule};
use hrprep_transform::ColumnReport;

pub fn print_summary(result: &RunResult) {
    let report = result.report();
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &result.report_json {
        println!("Report: {}", path.display());
    }
    println!(
        "Rows: {} loaded, {} typed, {} kept ({:.1}%)",
        report.rows_in,
        report.rows_typed,
        report.rows_out,
        report.retention() * 100.0
    );
    for threshold in &report.thresholds {
        println!("Filter: {} >= {}", threshold.column, threshold.min_label);
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Class"),
        header_cell("Nulls"),
        header_cell("Unranked"),
        header_cell("Categories"),
        header_cell("Bytes before"),
        header_cell("Bytes after"),
    ]);
    apply_summary_table_style(&mut table);
    for index in [2, 3, 4, 5, 6] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for column in &report.columns {
        table.add_row(column_row(column));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.columns.iter().map(|c| c.nulls).sum::<usize>())
            .add_attribute(Attribute::Bold),
        count_cell(report.unranked_total(), Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format_bytes(report.bytes_before)).add_attribute(Attribute::Bold),
        Cell::new(format_bytes(report.bytes_after)).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_classification(classification: &Classification) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Class"),
        header_cell("Values"),
    ]);
    apply_table_style(&mut table);
    for spec in classification.columns() {
        table.add_row(vec![
            Cell::new(&spec.name).add_attribute(Attribute::Bold),
            kind_cell(spec.rule.kind()),
            rule_values_cell(&spec.rule),
        ]);
    }
    println!("{table}");
}

fn column_row(column: &ColumnReport) -> Vec<Cell> {
    vec![
        Cell::new(&column.name).add_attribute(Attribute::Bold),
        kind_cell(column.kind),
        count_cell(column.nulls, Color::Reset),
        if column.kind == ColumnKind::Ordinal {
            count_cell(column.unranked, Color::Yellow)
        } else {
            dim_cell("-")
        },
        column.categories.map_or_else(|| dim_cell("-"), Cell::new),
        Cell::new(format_bytes(column.bytes_before)),
        Cell::new(format_bytes(column.bytes_after)),
    ]
}

fn rule_values_cell(rule: &ColumnRule) -> Cell {
    match rule {
        ColumnRule::Boolean(mapping) => Cell::new(
            mapping
                .entries()
                .iter()
                .map(|(key, value)| format!("{key} -> {value}"))
                .collect::<Vec<_>>()
                .join("; "),
        ),
        ColumnRule::Ordinal(scale) => Cell::new(scale.labels().join(" < ")),
        ColumnRule::Int32 | ColumnRule::Float16 | ColumnRule::Nominal => dim_cell("-"),
    }
}

fn kind_cell(kind: ColumnKind) -> Cell {
    let color = match kind {
        ColumnKind::Text => Color::DarkGrey,
        ColumnKind::Boolean => Color::Magenta,
        ColumnKind::Int32 | ColumnKind::Float16 => Color::Blue,
        ColumnKind::Ordinal => Color::Green,
        ColumnKind::Nominal => Color::Cyan,
    };
    Cell::new(kind.display_name()).fg(color)
}

fn format_bytes(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let value = bytes as f64;
    if value >= KIB * KIB {
        format!("{:.1} MiB", value / (KIB * KIB))
    } else if value >= KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{bytes} B")
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }
}
