//! Scalar operator parsing
//!
//! A `<ScalarOperator>` wrapper holds exactly one operator element; the
//! operator's tag selects the variant. Operands are nested wrappers.

use crate::common::{
    invalid_attribute, missing_element, parse_bool, parse_column_reference,
    parse_optional_number, required_attr, required_child, required_path,
};
use crate::error::{ParseError, ParseResult};
use crate::xml::Element;
use ps_core::{ArithmeticOp, CompareOp, ConstValue, LogicalOp, ScalarOperator};
use std::num::IntErrorKind;

/// Parse a `<ScalarOperator>` wrapper element
pub fn parse_scalar_operator(wrapper: &Element) -> ParseResult<ScalarOperator> {
    let operator = wrapper
        .children
        .first()
        .ok_or_else(|| missing_element(wrapper, "scalar operator"))?;

    if !operator.in_showplan_namespace() {
        return Err(ParseError::UnknownScalarOperator {
            tag: operator.name.clone(),
        });
    }

    match operator.name.as_str() {
        "Aggregate" => parse_aggregate(operator),
        "Arithmetic" => parse_arithmetic(operator),
        "Compare" => parse_compare(operator),
        "Const" => parse_const(operator),
        "Convert" => parse_convert(operator),
        "IF" | "If" => parse_if(operator),
        "Identifier" => parse_identifier(operator),
        "Intrinsic" => parse_intrinsic(operator),
        "Logical" => parse_logical(operator),
        other => Err(ParseError::UnknownScalarOperator {
            tag: other.to_string(),
        }),
    }
}

/// Every `<ScalarOperator>` child of `element`, in document order
fn parse_operands(element: &Element) -> ParseResult<Vec<ScalarOperator>> {
    element
        .children_named("ScalarOperator")
        .map(parse_scalar_operator)
        .collect()
}

fn parse_aggregate(element: &Element) -> ParseResult<ScalarOperator> {
    Ok(ScalarOperator::Aggregate {
        agg_type: required_attr(element, "AggType")?.to_string(),
        distinct: parse_bool(element, "Distinct")?,
        operands: parse_operands(element)?,
    })
}

fn parse_arithmetic(element: &Element) -> ParseResult<ScalarOperator> {
    let raw = required_attr(element, "Operation")?;
    let op = ArithmeticOp::from_showplan(raw)
        .ok_or_else(|| invalid_attribute(element, "Operation", raw))?;
    Ok(ScalarOperator::arithmetic(op, parse_operands(element)?)?)
}

fn parse_compare(element: &Element) -> ParseResult<ScalarOperator> {
    let raw = required_attr(element, "CompareOp")?;
    let op =
        CompareOp::from_showplan(raw).ok_or_else(|| invalid_attribute(element, "CompareOp", raw))?;
    Ok(ScalarOperator::compare(op, parse_operands(element)?)?)
}

fn parse_const(element: &Element) -> ParseResult<ScalarOperator> {
    let raw = required_attr(element, "ConstValue")?;
    let value = decode_const(raw).ok_or_else(|| invalid_attribute(element, "ConstValue", raw))?;
    Ok(ScalarOperator::constant(value))
}

/// Decode a literal. Numbers arrive parenthesised: `(10)`, `(2.5e+000)`;
/// anything not starting with `(` is kept as text.
pub(crate) fn decode_const(raw: &str) -> Option<ConstValue> {
    let Some(inner) = raw.strip_prefix('(') else {
        return Some(ConstValue::Text(raw.to_string()));
    };
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    if inner.contains('.') || inner.contains('e') {
        return inner.parse().ok().map(ConstValue::Float);
    }
    match inner.parse::<i64>() {
        Ok(value) => Some(ConstValue::Integer(value)),
        // wider than i64 (decimal(38) literals): keep the digits verbatim
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Some(ConstValue::Text(inner.to_string()))
        }
        Err(_) => None,
    }
}

fn parse_convert(element: &Element) -> ParseResult<ScalarOperator> {
    let operand = parse_scalar_operator(required_child(element, "ScalarOperator")?)?;
    Ok(ScalarOperator::Convert {
        operand: Box::new(operand),
        data_type: required_attr(element, "DataType")?.to_string(),
        implicit: element.attr("Implicit") == Some("1"),
        length: parse_optional_number(element, "Length")?,
        precision: parse_optional_number(element, "Precision")?,
        scale: parse_optional_number(element, "Scale")?,
    })
}

fn parse_if(element: &Element) -> ParseResult<ScalarOperator> {
    let branch = |name: &str| -> ParseResult<Box<ScalarOperator>> {
        let wrapper = required_path(element, &[name, "ScalarOperator"])?;
        parse_scalar_operator(wrapper).map(Box::new)
    };
    Ok(ScalarOperator::If {
        condition: branch("Condition")?,
        then: branch("Then")?,
        otherwise: branch("Else")?,
    })
}

fn parse_identifier(element: &Element) -> ParseResult<ScalarOperator> {
    let column = parse_column_reference(required_child(element, "ColumnReference")?)?;
    Ok(ScalarOperator::identifier(column))
}

fn parse_intrinsic(element: &Element) -> ParseResult<ScalarOperator> {
    let function_name = required_attr(element, "FunctionName")?;
    Ok(ScalarOperator::intrinsic(
        function_name,
        parse_operands(element)?,
    )?)
}

fn parse_logical(element: &Element) -> ParseResult<ScalarOperator> {
    let raw = required_attr(element, "Operation")?;
    let op =
        LogicalOp::from_showplan(raw).ok_or_else(|| invalid_attribute(element, "Operation", raw))?;
    Ok(ScalarOperator::Logical {
        op,
        operands: parse_operands(element)?,
    })
}

#[cfg(test)]
#[path = "scalar_test.rs"]
mod tests;
