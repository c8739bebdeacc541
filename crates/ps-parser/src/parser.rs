//! Showplan document → `ExecutionPlan`
//!
//! Each `<RelOp>` carries `LogicalOp`/`PhysicalOp` attributes that select an
//! operator kind (see [`crate::classify`]) and a detail element named after
//! that kind holding the operator's own data and its input `<RelOp>`s.

use crate::classify::classify;
use crate::common::{
    invalid_attribute, missing_element, parse_bool, parse_column_list, parse_column_reference,
    parse_object, parse_optional_bool, required_attr, required_child, required_path,
};
use crate::error::{ParseError, ParseResult};
use crate::scalar::parse_scalar_operator;
use crate::xml::{Element, SHOWPLAN_NAMESPACE};
use ps_core::{
    ColumnReference, CompareOp, DefinedValue, ExecutionPlan, OperatorKind, Operation, OrderBy,
    RelOp, ScalarOperator, ScanRange, SeekPredicate,
};

/// Parse a showplan XML document
pub fn parse_plan_str(xml: &str) -> ParseResult<ExecutionPlan> {
    let root = Element::parse_str(xml)?;
    parse_plan(&root)
}

/// Parse the root element of a showplan document
pub fn parse_plan(root: &Element) -> ParseResult<ExecutionPlan> {
    if !root.in_showplan_namespace() {
        return Err(ParseError::UnexpectedNamespace {
            element: root.name.clone(),
            expected: SHOWPLAN_NAMESPACE.to_string(),
            found: root.namespace.clone().unwrap_or_default(),
        });
    }

    let stmt = root
        .descendant("StmtSimple")
        .ok_or_else(|| missing_element(root, "StmtSimple"))?;
    let query = stmt.attr("StatementText").unwrap_or_default();
    let relop = stmt
        .descendant("RelOp")
        .ok_or_else(|| missing_element(stmt, "RelOp"))?;

    let relop = parse_relop(relop)?;
    log::debug!(
        "Parsed plan with {} operators, depth {}, for: {}",
        relop.descendants().count(),
        relop.depth(),
        query
    );
    Ok(ExecutionPlan::new(query, relop))
}

/// Parse one `<RelOp>` element and, recursively, its inputs
pub fn parse_relop(element: &Element) -> ParseResult<RelOp> {
    let logical = required_attr(element, "LogicalOp")?;
    let physical = required_attr(element, "PhysicalOp")?;
    let output_list = parse_column_list(required_child(element, "OutputList")?)?;

    let kind = classify(logical, physical)?;
    let body = required_child(element, kind.tag())?;
    let operation = parse_operation(kind, body)?;

    Ok(RelOp {
        operation,
        output_list,
        defined_values: parse_defined_values(element)?,
    })
}

fn parse_operation(kind: OperatorKind, body: &Element) -> ParseResult<Operation> {
    let defined_values = parse_defined_values(body)?;
    let operation = match kind {
        OperatorKind::ComputeScalar => Operation::ComputeScalar {
            relop: single_input(body)?,
            compute_sequence: parse_optional_bool(body, "ComputeSequence")?,
            defined_values,
        },
        OperatorKind::StreamAggregate => Operation::StreamAggregate {
            relop: single_input(body)?,
            group_by: match body.child("GroupBy") {
                Some(group_by) => parse_column_list(group_by)?,
                None => Vec::new(),
            },
            defined_values,
        },
        OperatorKind::IndexScan => Operation::IndexScan {
            ordered: parse_bool(body, "Ordered")?,
            obj: parse_object(required_child(body, "Object")?)?,
            seek_predicate: parse_seek_predicate(body)?,
            predicates: body
                .children_named("Predicate")
                .map(parse_predicate)
                .collect::<ParseResult<_>>()?,
            defined_values,
        },
        OperatorKind::TableScan => Operation::TableScan {
            ordered: parse_bool(body, "Ordered")?,
            obj: parse_object(required_child(body, "Object")?)?,
            predicate: body.child("Predicate").map(parse_predicate).transpose()?,
            defined_values,
        },
        OperatorKind::Sort => Operation::Sort {
            distinct: parse_bool(body, "Distinct")?,
            order_by: parse_order_by(required_child(body, "OrderBy")?)?,
            relop: single_input(body)?,
            defined_values,
        },
        OperatorKind::TopSort => Operation::TopSort {
            rows: parse_rows(body)?,
            distinct: parse_bool(body, "Distinct")?,
            order_by: parse_order_by(required_child(body, "OrderBy")?)?,
            relop: single_input(body)?,
            defined_values,
        },
        OperatorKind::Filter => Operation::Filter {
            startup_expression: parse_bool(body, "StartupExpression")?,
            relop: single_input(body)?,
            predicate: parse_predicate(required_child(body, "Predicate")?)?,
            defined_values,
        },
        OperatorKind::Top => Operation::Top {
            top_expression: parse_scalar_operator(required_path(
                body,
                &["TopExpression", "ScalarOperator"],
            )?)?,
            relop: single_input(body)?,
            defined_values,
        },
        OperatorKind::RowCountSpool => Operation::RowCountSpool {
            relop: single_input(body)?,
            defined_values,
        },
        OperatorKind::Spool => Operation::Spool {
            relop: single_input(body)?,
            defined_values,
        },
        OperatorKind::NestedLoops => {
            let (left, right) = two_inputs(body)?;
            Operation::NestedLoops {
                left,
                right,
                predicate: body.child("Predicate").map(parse_predicate).transpose()?,
                defined_values,
            }
        }
        OperatorKind::Merge => {
            let (left, right) = two_inputs(body)?;
            let (on_left, on_right) = parse_merge_columns(body)?;
            Operation::Merge {
                left,
                right,
                on_left,
                on_right,
                defined_values,
            }
        }
        OperatorKind::Hash => Operation::Hash {
            relops: many_inputs(body)?,
            defined_values,
        },
        OperatorKind::Concat => Operation::Concat {
            relops: many_inputs(body)?,
            defined_values,
        },
    };
    Ok(operation)
}

fn inputs(body: &Element) -> ParseResult<Vec<RelOp>> {
    body.children_named("RelOp").map(parse_relop).collect()
}

fn child_count_error(body: &Element, expected: &str, found: usize) -> ParseError {
    ParseError::ChildCount {
        element: body.name.clone(),
        expected: expected.to_string(),
        found,
    }
}

fn single_input(body: &Element) -> ParseResult<Box<RelOp>> {
    let relop = required_child(body, "RelOp")?;
    parse_relop(relop).map(Box::new)
}

fn two_inputs(body: &Element) -> ParseResult<(Box<RelOp>, Box<RelOp>)> {
    let relops = inputs(body)?;
    let [left, right] = <[RelOp; 2]>::try_from(relops)
        .map_err(|relops| child_count_error(body, "exactly 2", relops.len()))?;
    Ok((Box::new(left), Box::new(right)))
}

fn many_inputs(body: &Element) -> ParseResult<Vec<RelOp>> {
    let relops = inputs(body)?;
    if relops.is_empty() {
        return Err(child_count_error(body, "at least 1", 0));
    }
    Ok(relops)
}

/// `<Predicate><ScalarOperator>…</ScalarOperator></Predicate>`
fn parse_predicate(predicate: &Element) -> ParseResult<ScalarOperator> {
    parse_scalar_operator(required_child(predicate, "ScalarOperator")?)
}

fn parse_rows(body: &Element) -> ParseResult<u64> {
    let raw = required_attr(body, "Rows")?;
    raw.parse()
        .map_err(|_| invalid_attribute(body, "Rows", raw))
}

/// Sort direction is taken from the first `OrderByColumn`; the renderer
/// phrases a single direction for the whole key.
fn parse_order_by(order_by: &Element) -> ParseResult<OrderBy> {
    let mut ascending = None;
    let mut columns = Vec::new();
    for order_by_column in order_by.children_named("OrderByColumn") {
        let column_ascending = parse_bool(order_by_column, "Ascending")?;
        match ascending {
            None => ascending = Some(column_ascending),
            Some(first) if first != column_ascending => {
                log::warn!("Mixed sort directions; using the direction of the first column");
            }
            Some(_) => {}
        }
        columns.extend(parse_column_list(order_by_column)?);
    }
    let ascending = ascending.ok_or_else(|| missing_element(order_by, "OrderByColumn"))?;
    Ok(OrderBy { ascending, columns })
}

fn parse_seek_predicate(index_scan: &Element) -> ParseResult<Option<SeekPredicate>> {
    let seek_keys = index_scan
        .find(&["SeekPredicates", "SeekPredicateNew", "SeekKeys"])
        .or_else(|| index_scan.find(&["SeekPredicates", "SeekPredicate"]));
    let Some(seek_keys) = seek_keys else {
        return Ok(None);
    };

    let range = |name: &str| -> ParseResult<Option<ScanRange>> {
        seek_keys.child(name).map(parse_scan_range).transpose()
    };
    Ok(Some(SeekPredicate {
        prefix: range("Prefix")?,
        start_range: range("StartRange")?,
        end_range: range("EndRange")?,
    }))
}

fn parse_scan_range(element: &Element) -> ParseResult<ScanRange> {
    let raw = required_attr(element, "ScanType")?;
    let scan_type =
        CompareOp::from_showplan(raw).ok_or_else(|| invalid_attribute(element, "ScanType", raw))?;
    let range_columns = match element.child("RangeColumns") {
        Some(columns) => parse_column_list(columns)?,
        None => Vec::new(),
    };
    let range_expressions = element
        .find_all(&["RangeExpressions", "ScalarOperator"])
        .into_iter()
        .map(parse_scalar_operator)
        .collect::<ParseResult<_>>()?;
    Ok(ScanRange {
        scan_type,
        range_columns,
        range_expressions,
    })
}

/// Join columns of a merge join. Both sides must be present; a merge union
/// has neither.
fn parse_merge_columns(
    merge: &Element,
) -> ParseResult<(Option<ColumnReference>, Option<ColumnReference>)> {
    let inner = merge.find(&["InnerSideJoinColumns", "ColumnReference"]);
    let outer = merge.find(&["OuterSideJoinColumns", "ColumnReference"]);
    match (inner, outer) {
        (Some(inner), Some(outer)) => Ok((
            Some(parse_column_reference(inner)?),
            Some(parse_column_reference(outer)?),
        )),
        (None, None) => Ok((None, None)),
        _ => {
            log::warn!("Merge join with join columns on one side only; ignoring them");
            Ok((None, None))
        }
    }
}

/// `DefinedValues/DefinedValue` directly under `element`
pub(crate) fn parse_defined_values(element: &Element) -> ParseResult<Vec<DefinedValue>> {
    element
        .find_all(&["DefinedValues", "DefinedValue"])
        .into_iter()
        .map(parse_defined_value)
        .collect()
}

fn parse_defined_value(element: &Element) -> ParseResult<DefinedValue> {
    let columns = parse_column_list(element)?;
    if let Some(scalar) = element.child("ScalarOperator") {
        let scalar = parse_scalar_operator(scalar)?;
        let column = columns.into_iter().next().ok_or_else(|| {
            ParseError::InvalidDefinedValue {
                element: element.name.clone(),
                message: "expression without a target column".to_string(),
            }
        })?;
        return Ok(DefinedValue::Expression { column, scalar });
    }

    // A union output column followed by the two input columns it merges
    match <[ColumnReference; 3]>::try_from(columns) {
        Ok([column, left, right]) => Ok(DefinedValue::Union {
            column,
            left,
            right,
        }),
        Err(columns) => Ok(DefinedValue::Columns(columns)),
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
