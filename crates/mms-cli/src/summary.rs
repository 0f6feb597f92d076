use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mms_model::VocabularyTable;
use mms_transform::logging::redact_value;
use mms_transform::{FieldError, FieldErrorKind, MappingProfile, TransformerOptions};

use crate::commands::TransformRun;

pub fn print_profiles(profiles: &[&MappingProfile]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Marketplace"),
        header_cell("Version"),
        header_cell("Fields"),
        header_cell("Required"),
        header_cell("Delimiter"),
        header_cell("Encoding"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for profile in profiles {
        let summary = profile.summary();
        table.add_row(vec![
            Cell::new(summary.id).add_attribute(Attribute::Bold),
            Cell::new(summary.name),
            Cell::new(summary.marketplace).fg(Color::Cyan),
            Cell::new(summary.version),
            Cell::new(summary.fields),
            Cell::new(summary.required_fields.len()),
            Cell::new(summary.delimiter),
            Cell::new(summary.encoding),
        ]);
    }
    println!("{table}");
}

pub fn print_profile(profile: &MappingProfile) {
    println!("Profile: {} ({})", profile.id(), profile.name());
    println!("Marketplace: {}", profile.marketplace());
    println!("Version: {}", profile.version());
    if !profile.metadata().description.is_empty() {
        println!("Description: {}", profile.metadata().description);
    }
    println!(
        "Export: {} delimited, {}",
        profile.delimiter(),
        profile.encoding()
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Target"),
        header_cell("Source"),
        header_cell("Transformer"),
        header_cell("Validator"),
        header_cell("Required"),
        header_cell("Default"),
        header_cell("Options"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Center);
    for mapping in profile.mappings() {
        let target = if profile.requires(&mapping.target_field) {
            Cell::new(&mapping.target_field)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&mapping.target_field)
        };
        table.add_row(vec![
            target,
            Cell::new(&mapping.source_field),
            Cell::new(mapping.transformer.name()),
            mapping
                .validator
                .map_or_else(|| dim_cell("-"), |validator| Cell::new(validator.name())),
            flag_cell(mapping.is_fatal_in(profile)),
            mapping
                .default_value
                .as_ref()
                .map_or_else(|| dim_cell("-"), |value| Cell::new(value.to_string())),
            options_cell(&mapping.options),
        ]);
    }
    println!("{table}");
}

pub fn print_vocabulary(table: &VocabularyTable) {
    println!("Vocabulary: {} ({} pairs)", table.name(), table.len());
    let mut pairs = Table::new();
    pairs.set_header(vec![header_cell("Canonical"), header_cell("Localized")]);
    apply_table_style(&mut pairs);
    for (canonical, localized) in table.pairs() {
        pairs.add_row(vec![Cell::new(canonical), Cell::new(localized)]);
    }
    println!("{pairs}");

    if table.is_bijective() {
        println!("Bijective: yes");
        return;
    }
    println!("Bijective: no");
    for collision in table.collisions() {
        eprintln!(
            "- {:?} term '{}' kept '{}', rejected '{}'",
            collision.side, collision.term, collision.kept, collision.rejected
        );
    }
}

pub fn print_transform(run: &TransformRun) {
    println!("Input: {} ({} records)", run.input.display(), run.records);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Profile"),
        header_cell("Marketplace"),
        header_cell("Records"),
        header_cell("Succeeded"),
        header_cell("Failed"),
        header_cell("Warnings"),
        header_cell("Export"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for batch in &run.batches {
        let warnings: usize = batch
            .report
            .successes()
            .map(|(_, outcome)| outcome.errors().len())
            .sum();
        table.add_row(vec![
            Cell::new(&batch.report.profile_id).add_attribute(Attribute::Bold),
            Cell::new(&batch.marketplace).fg(Color::Cyan),
            Cell::new(batch.report.total()),
            count_cell(batch.report.succeeded, Color::Green),
            count_cell(batch.report.failed, Color::Red),
            count_cell(warnings, Color::Yellow),
            export_cell(batch.export.as_ref()),
        ]);
    }
    println!("{table}");
    print_error_table(run);
    if let Some(path) = &run.report_path {
        println!("Failure report: {}", path.display());
    }
}

fn print_error_table(run: &TransformRun) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Profile"),
        header_cell("Record"),
        header_cell("Field"),
        header_cell("Severity"),
        header_cell("Problem"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    let mut rows = 0usize;
    for batch in &run.batches {
        for (index, outcome) in batch.report.outcomes.iter().enumerate() {
            for error in outcome.errors() {
                table.add_row(vec![
                    Cell::new(&batch.report.profile_id),
                    Cell::new(index),
                    Cell::new(&error.field),
                    severity_cell(error.fatal),
                    Cell::new(problem(error)),
                ]);
                rows += 1;
            }
        }
    }
    if rows == 0 {
        return;
    }
    println!();
    println!("Field errors:");
    println!("{table}");
}

/// Error message with record values passed through log redaction.
fn problem(error: &FieldError) -> String {
    match &error.kind {
        FieldErrorKind::ValidationFailed { validator, value } => {
            format!("{validator} validation failed for '{}'", redact_value(value))
        }
        kind => kind.to_string(),
    }
}

fn options_cell(options: &TransformerOptions) -> Cell {
    let text = match options {
        TransformerOptions::None => return dim_cell("-"),
        TransformerOptions::MaxLength { max_length } => format!("maxLength={max_length}"),
        TransformerOptions::Separator {
            separator,
            unique,
            max_items,
        } => {
            let mut parts = vec![format!("separator={separator:?}")];
            if *unique {
                parts.push("unique".to_string());
            }
            if let Some(max) = max_items {
                parts.push(format!("maxItems={max}"));
            }
            parts.join(" ")
        }
        TransformerOptions::CategoryMap { table } => format!("categoryMap={table}"),
        TransformerOptions::BrandMap { table, localized } => {
            if *localized {
                format!("brandMap={table} localized")
            } else {
                format!("brandMap={table}")
            }
        }
    };
    Cell::new(text)
}

fn export_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display()).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn severity_cell(fatal: bool) -> Cell {
    if fatal {
        Cell::new("error").fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        Cell::new("warning").fg(Color::Yellow)
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
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
