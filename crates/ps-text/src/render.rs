//! Post-order plan walk producing numbered instructions

use crate::aggregate::{aggregate_phrases, join_phrases};
use crate::environment::Environment;
use crate::error::RenderResult;
use crate::format::format_scalar;
use ps_core::{
    ColumnReference, DefinedValue, ExecutionPlan, OperatorKind, Operation, OrderBy, RelOp,
    ScanRange, SeekPredicate,
};

/// Operators whose instruction never gets a `returning` trailer
const NO_TRAILER: [OperatorKind; 3] = [
    OperatorKind::NestedLoops,
    OperatorKind::ComputeScalar,
    OperatorKind::Spool,
];

/// Render a plan as newline-separated, 1-indexed instructions
pub fn plan_to_text(plan: &ExecutionPlan) -> RenderResult<String> {
    let lines: Vec<String> = plan_to_instructions(plan)?
        .into_iter()
        .enumerate()
        .map(|(i, instruction)| format!("{}. {instruction}", i + 1))
        .collect();
    Ok(lines.join("\n"))
}

/// Render a plan as unnumbered instructions in step order
pub fn plan_to_instructions(plan: &ExecutionPlan) -> RenderResult<Vec<String>> {
    let mut env = Environment::new();
    render_relop(&plan.relop, &mut env)?;
    Ok(env.into_instructions())
}

/// Render `relop` and its inputs into `env`.
///
/// Returns the step number holding this node's result. A `ComputeScalar`
/// with no expressions to compute reports its input's step.
pub fn render_relop(relop: &RelOp, env: &mut Environment) -> RenderResult<usize> {
    let step = match &relop.operation {
        Operation::TableScan {
            ordered,
            obj,
            predicate,
            ..
        } => {
            let mut text = format!("Scan {obj}{}", in_order(*ordered));
            if let Some(predicate) = predicate {
                text.push_str(" by checking ");
                text.push_str(&format_scalar(predicate, env));
            }
            env.emit(format!("{text}."))
        }

        Operation::IndexScan {
            ordered,
            obj,
            seek_predicate,
            predicates,
            ..
        } => {
            let mut clauses = Vec::new();
            if let Some(seek) = seek_predicate.as_ref().map(|s| seek_text(s, env)) {
                if !seek.is_empty() {
                    clauses.push(format!("seeking {seek}"));
                }
            }
            if !predicates.is_empty() {
                let checks: Vec<String> =
                    predicates.iter().map(|p| format_scalar(p, env)).collect();
                clauses.push(format!("checking {}", checks.join(", ")));
            }
            let mut text = format!("Scan {obj}{}", in_order(*ordered));
            if !clauses.is_empty() {
                text.push_str(" by ");
                text.push_str(&clauses.join(" and "));
            }
            env.emit(format!("{text}."))
        }

        Operation::ComputeScalar {
            relop,
            defined_values,
            ..
        } => {
            let mut step = render_relop(relop, env)?;
            for defined_value in defined_values {
                if let DefinedValue::Expression { column, scalar } = defined_value {
                    let expression = format_scalar(scalar, env);
                    step = env.emit(format!(
                        "Compute {expression} and store it as {}.",
                        column.column
                    ));
                }
            }
            step
        }

        Operation::StreamAggregate {
            relop,
            group_by,
            defined_values,
        } => {
            render_relop(relop, env)?;
            let phrases = join_phrases(&aggregate_phrases(defined_values, env)?);
            let columns = column_names(group_by, env);
            let text = match (columns.is_empty(), phrases.is_empty()) {
                (false, false) => format!("Group rows by {columns} and for each group, {phrases}."),
                (false, true) => format!("Group rows by {columns}."),
                (true, false) => format!("For all rows, {phrases}."),
                (true, true) => "Aggregate all rows.".to_string(),
            };
            env.emit(text)
        }

        Operation::Sort {
            distinct,
            order_by,
            relop,
            ..
        } => {
            render_relop(relop, env)?;
            let text = sort_phrase(*distinct, order_by, env);
            env.emit(format!("{text}."))
        }

        Operation::TopSort {
            rows,
            distinct,
            order_by,
            relop,
            ..
        } => {
            render_relop(relop, env)?;
            let text = sort_phrase(*distinct, order_by, env);
            env.emit(format!("{text} and keep the first {rows} rows."))
        }

        Operation::Top {
            top_expression,
            relop,
            ..
        } => {
            let input = render_relop(relop, env)?;
            let rows = format_scalar(top_expression, env);
            env.emit(format!("Keep the first {rows} rows of step {input}."))
        }

        Operation::Filter {
            startup_expression,
            relop,
            predicate,
            ..
        } => {
            let input = render_relop(relop, env)?;
            let condition = format_scalar(predicate, env);
            if *startup_expression {
                env.emit(format!("Continue with step {input} only if {condition}."))
            } else {
                env.emit(format!(
                    "Keep the rows of step {input} that satisfy the condition: {condition}."
                ))
            }
        }

        Operation::RowCountSpool { relop, .. } => {
            let input = render_relop(relop, env)?;
            env.emit(format!("Count the number of rows in step {input}."))
        }

        Operation::Spool { relop, .. } => {
            let input = render_relop(relop, env)?;
            env.emit(format!("Store the rows of step {input} in a temporary table."))
        }

        Operation::NestedLoops {
            left,
            right,
            predicate,
            ..
        } => {
            let outer = render_relop(left, env)?;
            let inner = render_relop(right, env)?;
            let mut text = format!("For each row in step {outer}, scan step {inner} and output rows");
            if let Some(predicate) = predicate {
                text.push_str(" matching the condition: ");
                text.push_str(&format_scalar(predicate, env));
            }
            env.emit(format!("{text}."))
        }

        Operation::Merge {
            left,
            right,
            on_left,
            on_right,
            ..
        } => {
            let first = render_relop(left, env)?;
            let second = render_relop(right, env)?;
            let mut text = format!("Merge the outputs of step {first} and step {second}");
            if let (Some(on_left), Some(on_right)) = (on_left, on_right) {
                text.push_str(&format!(
                    " on {} = {}",
                    qualified_name(on_left, env),
                    qualified_name(on_right, env)
                ));
            }
            env.emit(format!("{text}."))
        }

        Operation::Hash {
            relops,
            defined_values,
        } => {
            let inputs = render_inputs(relops, env)?;
            match inputs.as_slice() {
                [input] => {
                    let phrases = join_phrases(&aggregate_phrases(defined_values, env)?);
                    if phrases.is_empty() {
                        env.emit(format!("Remove duplicate rows of step {input} using hashing."))
                    } else {
                        env.emit(format!(
                            "Group the rows of step {input} using hashing and for each group, {phrases}."
                        ))
                    }
                }
                _ => env.emit(format!(
                    "Hash join the outputs of {}.",
                    step_list(&inputs)
                )),
            }
        }

        Operation::Concat { relops, .. } => {
            render_inputs(relops, env)?;
            env.emit(format!(
                "Concatenate the outputs of the previous {} nodes.",
                relops.len()
            ))
        }
    };

    register_defined_values(relop.operation.defined_values(), env);
    register_defined_values(&relop.defined_values, env);

    let kind = relop.operation.kind();
    if !relop.output_list.is_empty() && !NO_TRAILER.contains(&kind) {
        let columns: Vec<String> = relop
            .output_list
            .iter()
            .map(|column| env.column_name(column))
            .collect();
        env.append_returning(&columns);
    }

    Ok(step)
}

fn render_inputs(relops: &[RelOp], env: &mut Environment) -> RenderResult<Vec<usize>> {
    relops.iter().map(|relop| render_relop(relop, env)).collect()
}

fn register_defined_values(defined_values: &[DefinedValue], env: &mut Environment) {
    for defined_value in defined_values {
        match defined_value {
            DefinedValue::Expression { column, scalar } => {
                let text = format_scalar(scalar, env);
                env.register(column.column.clone(), text);
            }
            DefinedValue::Union { column, left, .. } => {
                let text = env.column_name(left);
                env.register(column.column.clone(), text);
            }
            DefinedValue::Columns(_) => {}
        }
    }
}

fn in_order(ordered: bool) -> &'static str {
    if ordered {
        " in order"
    } else {
        ""
    }
}

/// `table.column` when the table is known, else the resolved column name
fn qualified_name(column: &ColumnReference, env: &Environment) -> String {
    match &column.table {
        Some(table) => format!("{table}.{}", column.column),
        None => env.column_name(column),
    }
}

fn column_names(columns: &[ColumnReference], env: &Environment) -> String {
    columns
        .iter()
        .map(|column| env.column_name(column))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sort phrase without the final period. A non-distinct sort keeps the
/// empty slot, giving two spaces after `Sort`.
fn sort_phrase(distinct: bool, order_by: &OrderBy, env: &Environment) -> String {
    let columns: Vec<String> = order_by
        .columns
        .iter()
        .map(|column| qualified_name(column, env))
        .collect();
    let distinct = if distinct { "distinct" } else { "" };
    let order = if order_by.ascending {
        "ascending"
    } else {
        "descending"
    };
    format!(
        "Sort {distinct} values {} in {order} order",
        columns.join(", ")
    )
}

fn seek_text(seek: &SeekPredicate, env: &Environment) -> String {
    [&seek.prefix, &seek.start_range, &seek.end_range]
        .into_iter()
        .flatten()
        .flat_map(|range| range_conditions(range, env))
        .collect::<Vec<_>>()
        .join(" and ")
}

fn range_conditions(range: &ScanRange, env: &Environment) -> Vec<String> {
    if range.range_columns.len() != range.range_expressions.len() {
        log::warn!(
            "Seek range has {} columns but {} expressions",
            range.range_columns.len(),
            range.range_expressions.len()
        );
    }
    range
        .range_columns
        .iter()
        .zip(&range.range_expressions)
        .map(|(column, expression)| {
            format!(
                "{} {} {}",
                env.column_name(column),
                range.scan_type.sign(),
                format_scalar(expression, env)
            )
        })
        .collect()
}

/// `step 1 and step 2`, `step 1, step 2 and step 3`
fn step_list(steps: &[usize]) -> String {
    let steps: Vec<String> = steps.iter().map(|step| format!("step {step}")).collect();
    match steps.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
