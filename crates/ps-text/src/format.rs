//! Scalar expression → reader-facing text

use crate::environment::Environment;
use ps_core::{LogicalOp, ScalarOperator};

/// Format a scalar expression, resolving placeholders through `env`.
///
/// Conversions are invisible to the reader and column references render
/// without their table.
pub fn format_scalar(scalar: &ScalarOperator, env: &Environment) -> String {
    match scalar {
        ScalarOperator::Aggregate {
            agg_type,
            distinct,
            operands,
        } => {
            if agg_type == "countstar" {
                return "number of rows".to_string();
            }
            let distinct = if *distinct { "DISTINCT " } else { "" };
            format!("{agg_type}({distinct}{})", format_list(operands, env, ", "))
        }
        ScalarOperator::Arithmetic { op, operands } => format!(
            "{} {} {}",
            format_scalar(&operands[0], env),
            op.sign(),
            format_scalar(&operands[1], env)
        ),
        ScalarOperator::Compare { op, operands } => format!(
            "{} {} {}",
            format_scalar(&operands[0], env),
            op.sign(),
            format_scalar(&operands[1], env)
        ),
        ScalarOperator::Const { value } => value.to_string(),
        ScalarOperator::Convert { operand, .. } => format_scalar(operand, env),
        ScalarOperator::If {
            condition,
            then,
            otherwise,
        } => format!(
            "{} if {}, otherwise {}",
            format_scalar(then, env),
            format_scalar(condition, env),
            format_scalar(otherwise, env)
        ),
        ScalarOperator::Identifier { column } => env.column_name(column),
        ScalarOperator::Intrinsic {
            function_name,
            operands,
        } => format!(
            "{} {} {}",
            format_scalar(&operands[0], env),
            function_name,
            format_scalar(&operands[1], env)
        ),
        ScalarOperator::Logical { op, operands } => format_logical(*op, operands, env),
    }
}

fn format_list(operands: &[ScalarOperator], env: &Environment, separator: &str) -> String {
    operands
        .iter()
        .map(|operand| format_scalar(operand, env))
        .collect::<Vec<_>>()
        .join(separator)
}

fn format_logical(op: LogicalOp, operands: &[ScalarOperator], env: &Environment) -> String {
    if op == LogicalOp::IsNull {
        return operands
            .iter()
            .map(|operand| format!("{} IS NULL", format_scalar(operand, env)))
            .collect::<Vec<_>>()
            .join(" AND ");
    }

    let separator = format!(" {} ", op.keyword());
    operands
        .iter()
        .map(|operand| match operand {
            // a connective nested under a different connective keeps its grouping
            ScalarOperator::Logical { op: inner, .. }
                if *inner != op && *inner != LogicalOp::IsNull =>
            {
                format!("({})", format_scalar(operand, env))
            }
            _ => format_scalar(operand, env),
        })
        .collect::<Vec<_>>()
        .join(&separator)
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
