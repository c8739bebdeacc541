//! Record-node labels describing each operator

use ps_core::{DefinedValue, Operation, OrderBy, ScanRange, SeekPredicate};

/// Title and detail lines for an operator's record node
pub fn describe(operation: &Operation) -> (String, Vec<String>) {
    let mut details = Vec::new();
    match operation {
        Operation::TableScan {
            ordered,
            obj,
            predicate,
            ..
        } => {
            details.push(format!("Scan Object: {obj}"));
            details.push(format!("Ordered? {ordered}"));
            if let Some(predicate) = predicate {
                section(&mut details, "Predicate:", [predicate.to_string()]);
            }
        }
        Operation::IndexScan {
            ordered,
            obj,
            seek_predicate,
            predicates,
            ..
        } => {
            details.push(format!("Scan Object: {obj}"));
            details.push(format!("Ordered? {ordered}"));
            if let Some(seek) = seek_predicate {
                section(&mut details, "Seek Predicate:", seek_lines(seek));
            }
            if !predicates.is_empty() {
                section(
                    &mut details,
                    "Predicates:",
                    predicates.iter().map(ToString::to_string),
                );
            }
        }
        Operation::StreamAggregate { group_by, .. } => {
            if !group_by.is_empty() {
                section(
                    &mut details,
                    "Group By:",
                    group_by.iter().map(ToString::to_string),
                );
            }
        }
        Operation::Sort {
            distinct, order_by, ..
        } => {
            details.push(format!("Distinct? {distinct}"));
            details.extend(order_by_lines(order_by));
        }
        Operation::TopSort {
            rows,
            distinct,
            order_by,
            ..
        } => {
            details.push(format!("Rows: {rows}"));
            details.push(format!("Distinct? {distinct}"));
            details.extend(order_by_lines(order_by));
        }
        Operation::Top { top_expression, .. } => {
            details.push(format!("Top Expression: {top_expression}"));
        }
        Operation::Filter {
            startup_expression,
            predicate,
            ..
        } => {
            if *startup_expression {
                details.push("Startup Expression".to_string());
            }
            section(&mut details, "Predicate:", [predicate.to_string()]);
        }
        Operation::NestedLoops { predicate, .. } => {
            if let Some(predicate) = predicate {
                section(&mut details, "Predicate:", [predicate.to_string()]);
            }
        }
        Operation::Merge {
            on_left, on_right, ..
        } => {
            if let (Some(left), Some(right)) = (on_left, on_right) {
                details.push(format!("LHS: {left}"));
                details.push(format!("RHS: {right}"));
            }
        }
        Operation::ComputeScalar { .. }
        | Operation::Hash { .. }
        | Operation::Concat { .. }
        | Operation::RowCountSpool { .. }
        | Operation::Spool { .. } => {}
    }

    let defined_values: Vec<&DefinedValue> = operation
        .defined_values()
        .iter()
        .filter(|dv| !matches!(dv, DefinedValue::Columns(_)))
        .collect();
    if !defined_values.is_empty() {
        section(
            &mut details,
            "Defined Values:",
            defined_values.iter().map(ToString::to_string),
        );
    }

    (operation.kind().title().to_string(), details)
}

/// Append a headed block, separated from earlier details by a blank line
fn section(details: &mut Vec<String>, heading: &str, lines: impl IntoIterator<Item = String>) {
    if !details.is_empty() {
        details.push(String::new());
    }
    details.push(heading.to_string());
    details.extend(lines);
}

fn order_by_lines(order_by: &OrderBy) -> Vec<String> {
    let direction = if order_by.ascending { "ASC" } else { "DESC" };
    let mut lines = vec![format!("Order By ({direction}):")];
    lines.extend(order_by.columns.iter().map(ToString::to_string));
    lines
}

fn seek_lines(seek: &SeekPredicate) -> Vec<String> {
    [
        ("Prefix", &seek.prefix),
        ("Start", &seek.start_range),
        ("End", &seek.end_range),
    ]
    .into_iter()
    .filter_map(|(name, range)| range.as_ref().map(|r| format!("{name}: {}", range_text(r))))
    .collect()
}

fn range_text(range: &ScanRange) -> String {
    range
        .range_columns
        .iter()
        .zip(&range.range_expressions)
        .map(|(column, expression)| format!("{column} {} {expression}", range.scan_type.sign()))
        .collect::<Vec<_>>()
        .join(" AND ")
}

#[cfg(test)]
#[path = "label_test.rs"]
mod tests;
