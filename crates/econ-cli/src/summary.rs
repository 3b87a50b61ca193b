use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use econ_core::{MergeReport, SourceSummary};
use econ_ingest::{RawFileCheck, RawFileInfo, RawFileStatus};
use econ_standards::Country;

use crate::types::{CountriesResult, HarmonizeResult, InspectResult, Resolution};

pub fn print_harmonize_summary(result: &HarmonizeResult) {
    let outcome = &result.outcome;
    match &outcome.output_path {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, not written)"),
    }
    if let Some(path) = &result.report_path {
        println!("Run report: {}", path.display());
    }
    println!("{}", source_table(&outcome.sources));
    println!();
    println!("{}", merge_table(&outcome.merge, result.min_observations));
    println!(
        "{} rows x {} columns in {} ms",
        outcome.output_rows, outcome.output_columns, outcome.duration_ms
    );
}

pub fn source_table(sources: &[SourceSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("File"),
        header_cell("Delimiter"),
        header_cell("Encoding"),
        header_cell("Rows"),
        header_cell("Unresolved"),
        header_cell("Null dates"),
        header_cell("Null values"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for index in 4..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_rows = 0usize;
    for summary in sources {
        total_rows += summary.clean.rows;
        let file = summary
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| summary.path.display().to_string());
        table.add_row(vec![
            source_cell(summary.kind.as_str()),
            Cell::new(file),
            Cell::new(delimiter_label(summary.raw.delimiter)),
            Cell::new(summary.raw.encoding.as_str()),
            Cell::new(summary.clean.rows),
            count_cell(summary.clean.unresolved_countries, Color::Yellow),
            count_cell(summary.clean.null_dates, Color::Yellow),
            count_cell(summary.clean.null_values, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

pub fn merge_table(report: &MergeReport, min_observations: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Merge step"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let steps = [
        ("Joined rows", report.joined_rows),
        ("Rows with a wage match", report.wage_matches),
        ("Commodity dates", report.commodity_dates),
        ("Commodity dates averaged", report.commodity_dates_averaged),
        ("Exact duplicates removed", report.exact_duplicates_removed),
        ("Key collisions removed", report.key_collisions_removed),
        ("Rows without a country", report.null_country_rows_removed),
        ("Rows below coverage", report.coverage_rows_removed),
    ];
    for (label, count) in steps {
        table.add_row(vec![Cell::new(label), count_cell(count, Color::Yellow)]);
    }
    table.add_row(vec![
        Cell::new(format!("Countries kept (> {min_observations} dates)")),
        Cell::new(report.countries_retained),
    ]);
    table.add_row(vec![
        Cell::new("Countries dropped"),
        count_cell(report.countries_dropped.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Output rows")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.output_rows).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn print_inspect(result: &InspectResult) {
    println!("Raw directory: {}", result.raw_dir.display());
    println!("{}", inspect_table(&result.checks));
    for check in &result.checks {
        if let RawFileStatus::Loaded {
            headers, preview, ..
        } = &check.status
        {
            if preview.is_empty() {
                continue;
            }
            println!();
            println!("{}:", check.label);
            println!("{}", preview_table(headers, preview));
        }
    }
}

pub fn inspect_table(checks: &[RawFileCheck]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Delimiter"),
        header_cell("Encoding"),
        header_cell("Detail"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for check in checks {
        let label = source_cell(&check.label);
        let row = match &check.status {
            RawFileStatus::Missing => vec![
                label,
                Cell::new("MISSING")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                Cell::new(check.path.display()),
            ],
            RawFileStatus::Unreadable { message } => vec![
                label,
                Cell::new("ERROR").fg(Color::Red),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                Cell::new(message),
            ],
            RawFileStatus::Loaded { info, .. } => {
                let detail = raw_detail(info);
                vec![
                    label,
                    Cell::new("OK")
                        .fg(Color::Green)
                        .add_attribute(Attribute::Bold),
                    Cell::new(info.rows),
                    Cell::new(info.columns),
                    Cell::new(delimiter_label(info.delimiter)),
                    Cell::new(info.encoding.as_str()),
                    detail,
                ]
            }
        };
        table.add_row(row);
    }
    table
}

fn raw_detail(info: &RawFileInfo) -> Cell {
    let mut parts = Vec::new();
    if info.dropped_rows > 0 {
        parts.push(format!("dropped {} blank rows", info.dropped_rows));
    }
    if !info.dropped_columns.is_empty() {
        parts.push(format!(
            "dropped unnamed columns: {}",
            info.dropped_columns.join(", ")
        ));
    }
    if !info.blank_columns.is_empty() {
        parts.push(format!("empty columns: {}", info.blank_columns.join(", ")));
    }
    if parts.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(parts.join("; ")).fg(Color::Yellow)
    }
}

fn preview_table(headers: &[String], rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();
    table.set_header(
        headers
            .iter()
            .map(String::as_str)
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(row.iter().map(|value| {
            if value.is_empty() {
                dim_cell("null")
            } else {
                Cell::new(value)
            }
        }));
    }
    table
}

pub fn print_countries(result: &CountriesResult) {
    match result {
        CountriesResult::Listing(countries) => {
            println!("{}", registry_table(countries));
            println!("{} countries", countries.len());
        }
        CountriesResult::Resolved(resolutions) => {
            println!("{}", resolution_table(resolutions));
        }
    }
}

pub fn registry_table(countries: &[Country]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Alpha-3"),
        header_cell("Alpha-2"),
        header_cell("Numeric"),
        header_cell("Name"),
    ]);
    apply_table_style(&mut table);
    for country in countries {
        table.add_row(vec![
            code_cell(country.alpha_3.as_str()),
            Cell::new(&country.alpha_2),
            Cell::new(&country.numeric),
            Cell::new(&country.name),
        ]);
    }
    table
}

pub fn resolution_table(resolutions: &[Resolution]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Query"),
        header_cell("Code"),
        header_cell("Name"),
    ]);
    apply_table_style(&mut table);
    for resolution in resolutions {
        let row = match &resolution.country {
            Some(country) => vec![
                Cell::new(&resolution.query),
                code_cell(country.alpha_3.as_str()),
                Cell::new(&country.name),
            ],
            None => vec![
                Cell::new(&resolution.query),
                Cell::new("unresolved").fg(Color::Yellow),
                dim_cell("-"),
            ],
        };
        table.add_row(row);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn delimiter_label(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "tab".to_string(),
        other => char::from(other).to_string(),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn source_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn code_cell(code: &str) -> Cell {
    Cell::new(code).fg(Color::Blue)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_labels() {
        assert_eq!(delimiter_label(b','), ",");
        assert_eq!(delimiter_label(b';'), ";");
        assert_eq!(delimiter_label(b'\t'), "tab");
    }

    #[test]
    fn merge_table_lists_output_rows() {
        let report = MergeReport {
            output_rows: 4,
            countries_retained: 1,
            ..MergeReport::default()
        };
        let rendered = merge_table(&report, 3).to_string();
        assert!(rendered.contains("Output rows"));
        assert!(rendered.contains("Countries kept (> 3 dates)"));
    }

    #[test]
    fn raw_detail_names_empty_columns() {
        let info = RawFileInfo {
            encoding: econ_ingest::TextEncoding::Utf8,
            delimiter: b',',
            rows: 2,
            columns: 3,
            dropped_rows: 1,
            dropped_columns: Vec::new(),
            blank_columns: vec!["OBS_VALUE".to_string()],
        };
        let rendered = raw_detail(&info).content();
        assert_eq!(rendered, "dropped 1 blank rows; empty columns: OBS_VALUE");
    }

    #[test]
    fn unresolved_names_are_marked() {
        let table = resolution_table(&[Resolution {
            query: "Freedonia".to_string(),
            country: None,
        }]);
        let rendered = table.to_string();
        assert!(rendered.contains("Freedonia"));
        assert!(rendered.contains("unresolved"));
    }
}
