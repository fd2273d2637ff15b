//! Terminal summaries for derived structures.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use lens_model::{
    HierarchyOutput, IssueSeverity, NetworkData, QualityIssue, SchemaSet, TabularProfile,
};
use lens_transform::{
    Derived, MappingReport, flatten, hierarchy_stats, network_stats, node_degrees,
};

/// Rows shown for trees and graphs before the table is cut off.
pub const MAX_ROWS: usize = 40;

pub fn print_summary(derived: &Derived) {
    println!("{}", headline(derived));
    match derived {
        Derived::Hierarchy(output) => {
            println!("{}", hierarchy_table(output, MAX_ROWS));
            print_issues(&scoped_issues("hierarchy", &output.issues));
        }
        Derived::Tabular(profiles) => {
            println!("{}", profile_table(profiles));
            let issues: Vec<(String, &QualityIssue)> = profiles
                .iter()
                .flat_map(|profile| {
                    profile
                        .quality_issues
                        .iter()
                        .map(move |issue| (profile.column.clone(), issue))
                })
                .collect();
            print_issues(&issues);
        }
        Derived::Network(network) => println!("{}", network_table(network, MAX_ROWS)),
    }
}

/// One-line description of a derived structure.
pub fn headline(derived: &Derived) -> String {
    match derived {
        Derived::Hierarchy(output) => {
            let stats = hierarchy_stats(&output.roots);
            format!(
                "Hierarchy: {} nodes in {} trees, {} leaves, max depth {}",
                stats.node_count, stats.root_count, stats.leaf_count, stats.max_depth
            )
        }
        Derived::Tabular(profiles) => {
            let rows = profiles.first().map_or(0, |profile| profile.total_count);
            let average = if profiles.is_empty() {
                0.0
            } else {
                profiles
                    .iter()
                    .map(|profile| f64::from(profile.quality_score))
                    .sum::<f64>()
                    / profiles.len() as f64
            };
            format!(
                "Profile: {} columns over {rows} rows, average quality {average:.0}",
                profiles.len()
            )
        }
        Derived::Network(network) => {
            let stats = network_stats(network);
            format!(
                "Network: {} nodes, {} edges, total weight {}",
                stats.node_count, stats.edge_count, stats.total_weight
            )
        }
    }
}

pub fn hierarchy_table(output: &HierarchyOutput, max_rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Node"),
        header_cell("Label"),
        header_cell("Depth"),
        header_cell("Children"),
        header_cell("Metrics"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let nodes = flatten(&output.roots);
    for node in nodes.iter().take(max_rows) {
        let metrics = node
            .metrics
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(format!("{}{}", "  ".repeat(node.depth), node.id)),
            Cell::new(&node.label),
            Cell::new(node.depth),
            count_cell(node.child_count),
            if metrics.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(metrics)
            },
        ]);
    }
    add_overflow_row(&mut table, nodes.len(), max_rows, 5);
    table
}

pub fn profile_table(profiles: &[TabularProfile]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Name"),
        header_cell("Type"),
        header_cell("Nulls"),
        header_cell("Unique"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Score"),
        header_cell("Issues"),
    ]);
    apply_summary_table_style(&mut table);
    for index in [3, 4, 5, 6, 7, 8] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for profile in profiles {
        let (min, max) = match &profile.numeric_stats {
            Some(stats) => (Cell::new(stats.min), Cell::new(stats.max)),
            None => (dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(&profile.column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&profile.display_name),
            Cell::new(profile.data_type),
            Cell::new(format!("{}/{}", profile.null_count, profile.total_count)),
            Cell::new(profile.unique_count),
            min,
            max,
            score_cell(profile.quality_score),
            count_cell(profile.quality_issues.len()),
        ]);
    }
    table
}

pub fn network_table(network: &NetworkData, max_rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Node"),
        header_cell("Group"),
        header_cell("In"),
        header_cell("Out"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let degrees = node_degrees(network);
    for (node, degree) in network.nodes.iter().zip(&degrees).take(max_rows) {
        table.add_row(vec![
            Cell::new(&node.id),
            node.group.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
            count_cell(degree.in_degree),
            count_cell(degree.out_degree),
        ]);
    }
    add_overflow_row(&mut table, degrees.len(), max_rows, 4);
    table
}

/// Issues attributed to a scope (column name, or the builder for structural
/// findings), most severe first.
pub fn issue_table(issues: &[(String, &QualityIssue)]) -> Table {
    let mut ordered: Vec<&(String, &QualityIssue)> = issues.iter().collect();
    ordered.sort_by_key(|(_, issue)| severity_rank(issue.severity));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Scope"),
        header_cell("Severity"),
        header_cell("Type"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for (scope, issue) in ordered {
        table.add_row(vec![
            Cell::new(scope),
            severity_cell(issue.severity),
            Cell::new(issue.kind),
            issue.count.map_or_else(
                || dim_cell("-"),
                |count| Cell::new(count).fg(severity_color(issue.severity)),
            ),
            Cell::new(&issue.message),
        ]);
    }
    table
}

pub fn print_mapping_report(report: &MappingReport) {
    println!(
        "Mappings for '{}': {} errors, {} warnings",
        report.schema_id,
        report.error_count(),
        report.warning_count()
    );
    print_issues(&scoped_issues(&report.schema_id, &report.issues));
}

pub fn schema_table(schemas: &SchemaSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Schema"),
        header_cell("Kind"),
        header_cell("Role"),
        header_cell("Required"),
        header_cell("Multiple"),
        header_cell("Type"),
    ]);
    apply_table_style(&mut table);
    for schema in schemas.iter() {
        for (index, role) in schema.roles.iter().enumerate() {
            let (schema_cell, kind_cell) = if index == 0 {
                (
                    Cell::new(&schema.id)
                        .fg(Color::Blue)
                        .add_attribute(Attribute::Bold),
                    Cell::new(schema.kind),
                )
            } else {
                (Cell::new(""), Cell::new(""))
            };
            table.add_row(vec![
                schema_cell,
                kind_cell,
                Cell::new(&role.id),
                flag_cell(role.required),
                flag_cell(role.multiple),
                role.data_type.map_or_else(|| dim_cell("any"), Cell::new),
            ]);
        }
    }
    table
}

fn scoped_issues<'a>(scope: &str, issues: &'a [QualityIssue]) -> Vec<(String, &'a QualityIssue)> {
    issues
        .iter()
        .map(|issue| (scope.to_string(), issue))
        .collect()
}

fn print_issues(issues: &[(String, &QualityIssue)]) {
    if issues.is_empty() {
        return;
    }
    println!();
    println!("Issues:");
    println!("{}", issue_table(issues));
}

fn add_overflow_row(table: &mut Table, total: usize, shown: usize, columns: usize) {
    if total <= shown {
        return;
    }
    let mut row = vec![dim_cell(format!("... {} more", total - shown))];
    row.extend((1..columns).map(|_| Cell::new("")));
    table.add_row(row);
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

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn score_cell(score: u8) -> Cell {
    let color = match score {
        90..=100 => Color::Green,
        60..=89 => Color::Yellow,
        _ => Color::Red,
    };
    Cell::new(score).fg(color).add_attribute(Attribute::Bold)
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
        IssueSeverity::Info => Cell::new("INFO").fg(Color::DarkGrey),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 0,
        IssueSeverity::Warning => 1,
        IssueSeverity::Info => 2,
    }
}

fn severity_color(severity: IssueSeverity) -> Color {
    match severity {
        IssueSeverity::Error => Color::Red,
        IssueSeverity::Warning => Color::Yellow,
        IssueSeverity::Info => Color::DarkGrey,
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
