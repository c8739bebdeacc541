//! Aggregate function phrasing

use crate::environment::Environment;
use crate::error::{RenderError, RenderResult};
use crate::format::format_scalar;
use ps_core::{DefinedValue, ScalarOperator};

/// Phrase for one aggregate, such as `count the number of rows`.
///
/// `ANY` yields `None`: it only carries a grouped value through and is not
/// worth a phrase. Non-aggregate expressions are phrased as a computation.
pub fn aggregate_phrase(scalar: &ScalarOperator, env: &Environment) -> RenderResult<Option<String>> {
    let ScalarOperator::Aggregate {
        agg_type,
        distinct,
        operands,
    } = scalar
    else {
        return Ok(Some(format!("compute {}", format_scalar(scalar, env))));
    };

    let target = operands
        .iter()
        .map(|operand| format_scalar(operand, env))
        .collect::<Vec<_>>()
        .join(", ");

    let phrase = match (agg_type.as_str(), *distinct) {
        ("countstar", _) => "count the number of rows".to_string(),
        ("COUNT_BIG", false) => format!("count the number of non-null rows in {target}"),
        ("COUNT_BIG", true) => {
            format!("count the number of distinct non-null values in {target}")
        }
        ("MAX", _) => format!("take the maximum value in {target}"),
        ("MIN", _) => format!("take the minimum value in {target}"),
        ("SUM", false) => format!("take the sum of the values in {target}"),
        ("SUM", true) => format!("take the sum of the distinct values in {target}"),
        ("ANY", _) => return Ok(None),
        _ => {
            return Err(RenderError::UnsupportedAggregate {
                agg_type: agg_type.clone(),
            })
        }
    };
    Ok(Some(phrase))
}

/// Phrases for every expression-bound defined value, in order
pub fn aggregate_phrases(
    defined_values: &[DefinedValue],
    env: &Environment,
) -> RenderResult<Vec<String>> {
    let mut phrases = Vec::new();
    for defined_value in defined_values {
        if let DefinedValue::Expression { scalar, .. } = defined_value {
            phrases.extend(aggregate_phrase(scalar, env)?);
        }
    }
    Ok(phrases)
}

/// Join phrases as prose: `a`, `a and b`, `a, b, and c`
pub fn join_phrases(phrases: &[String]) -> String {
    match phrases {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
