//! Terminal tables for status summaries and concept listings.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use connect_concepts::{ConceptMap, DoctorReport};
use connect_model::{ActivityStatus, NOT_AVAILABLE, ParticipantSummary, Severity};

const STATUS_HEADERS: [&str; 9] = [
    "", "Timeline", "Category", "Item", "Status", "Date", "Setting", "Refused", "Extra",
];

/// Heading line above a participant's table.
pub fn participant_heading(summary: &ParticipantSummary) -> String {
    let id = summary.connect_id.as_deref().unwrap_or(NOT_AVAILABLE);
    match summary.display_name() {
        Some(name) => format!("Participant {id}: {name}"),
        None => format!("Participant {id}"),
    }
}

/// Plain cell text for each status row, in table column order.
pub fn status_rows(summary: &ParticipantSummary) -> Vec<[String; 9]> {
    summary
        .activities
        .iter()
        .map(|row| {
            [
                row.icon.glyph().to_string(),
                row.timeline.clone(),
                row.category.clone(),
                row.item.clone(),
                row.status_text.clone(),
                row.date.clone(),
                row.setting.clone(),
                row.refused.to_string(),
                row.extra.clone(),
            ]
        })
        .collect()
}

pub fn status_table(summary: &ParticipantSummary) -> Table {
    let mut table = Table::new();
    table.set_header(
        STATUS_HEADERS
            .iter()
            .map(|label| header_cell(label))
            .collect::<Vec<_>>(),
    );
    apply_status_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 7, CellAlignment::Center);

    for row in &summary.activities {
        let color = severity_color(row.severity);
        table.add_row(vec![
            Cell::new(row.icon.glyph()).fg(color).add_attribute(Attribute::Bold),
            dim_or_plain(&row.timeline),
            dim_or_plain(&row.category),
            Cell::new(&row.item).add_attribute(Attribute::Bold),
            Cell::new(&row.status_text).fg(color),
            dim_or_plain(&row.date),
            dim_or_plain(&row.setting),
            refused_cell(row),
            dim_or_plain(&row.extra),
        ]);
    }
    table
}

/// One-line tally printed under the status table.
pub fn status_footer(summary: &ParticipantSummary) -> String {
    format!(
        "{} activities, {} outstanding, {} refused",
        summary.activities.len(),
        summary.error_count(),
        summary.refused_count()
    )
}

/// Table of symbolic names with their concept IDs and labels.
///
/// `names` pairs each requested name with its concept ID.
pub fn concept_table(concepts: &ConceptMap, names: &[(String, u64)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Concept ID"),
        header_cell("Label"),
        header_cell("Alias of"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, id) in names {
        let label = concepts
            .label(connect_model::ConceptId::new(*id))
            .unwrap_or("-");
        let canonical = concepts.alias_of(name).unwrap_or("-");
        table.add_row(vec![
            Cell::new(name).fg(Color::Blue),
            Cell::new(id),
            dim_or_plain(label),
            dim_or_plain(canonical),
        ]);
    }
    table
}

pub fn doctor_table(report: &DoctorReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Value")]);
    apply_table_style(&mut table);
    let counts = &report.counts;
    let rows: Vec<(&str, String)> = vec![
        ("Origin", report.origin.clone()),
        (
            "Release",
            report.release.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("Fingerprint", report.fingerprint.clone()),
        ("Fields", counts.fields.to_string()),
        ("Groups", counts.groups.to_string()),
        ("Codes", counts.codes.to_string()),
        ("Labels", counts.labels.to_string()),
        ("Aliases", counts.aliases.to_string()),
        ("Schema paths", counts.schema_paths.to_string()),
    ];
    for (check, value) in rows {
        table.add_row(vec![Cell::new(check).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    let unresolved = if report.unresolved.is_empty() {
        Cell::new("none").fg(Color::Green)
    } else {
        Cell::new(report.unresolved.join("\n")).fg(Color::Red)
    };
    table.add_row(vec![Cell::new("Unresolved").add_attribute(Attribute::Bold), unresolved]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_status_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 9 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(3)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Ok => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

fn refused_cell(row: &ActivityStatus) -> Cell {
    if row.refused.is_refused() {
        Cell::new(row.refused).fg(Color::Magenta).add_attribute(Attribute::Bold)
    } else {
        Cell::new(row.refused).fg(Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_or_plain(value: &str) -> Cell {
    if value == NOT_AVAILABLE || value == "-" {
        Cell::new(value).fg(Color::DarkGrey)
    } else {
        Cell::new(value)
    }
}

#[cfg(test)]
mod tests {
    use connect_model::{Icon, RefusedFlag};

    use super::*;

    fn summary() -> ParticipantSummary {
        ParticipantSummary {
            connect_id: Some("1234567890".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            activities: vec![
                ActivityStatus::new("Baseline", "Sample", "Blood")
                    .with_status("Not Collected", Icon::Times, Severity::Error)
                    .with_refused(RefusedFlag::Yes),
            ],
        }
    }

    #[test]
    fn heading_and_footer() {
        let summary = summary();
        assert_eq!(participant_heading(&summary), "Participant 1234567890: Lovelace, Ada");
        assert_eq!(status_footer(&summary), "1 activities, 1 outstanding, 1 refused");
    }

    #[test]
    fn table_has_one_row_per_activity() {
        let mut table = status_table(&summary());
        assert_eq!(table.column_count(), 9);
        assert_eq!(table.row_count(), 1);
        assert!(table.to_string().contains("Not Collected"));
    }
}
