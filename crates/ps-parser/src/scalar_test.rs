use super::*;
use crate::xml::SHOWPLAN_NAMESPACE;
use ps_core::{ArityError, ColumnReference};

fn scalar(body: &str) -> ParseResult<ScalarOperator> {
    let xml = format!(r#"<ScalarOperator xmlns="{SHOWPLAN_NAMESPACE}">{body}</ScalarOperator>"#);
    let element = Element::parse_str(&xml)?;
    parse_scalar_operator(&element)
}

fn ident(column: &str) -> String {
    format!(
        r#"<ScalarOperator><Identifier><ColumnReference Table="[singer]" Column="{column}"/></Identifier></ScalarOperator>"#
    )
}

fn constant(value: &str) -> String {
    format!(r#"<ScalarOperator><Const ConstValue="{value}"/></ScalarOperator>"#)
}

#[test]
fn test_identifier() {
    let parsed = scalar(
        r#"<Identifier><ColumnReference Database="[db]" Schema="[dbo]" Table="[singer]" Column="age"/></Identifier>"#,
    )
    .unwrap();
    assert_eq!(
        parsed,
        ScalarOperator::identifier(
            ColumnReference::new("age")
                .with_schema("[dbo]")
                .with_table("[singer]")
        )
    );
}

#[test]
fn test_const_decoding() {
    assert_eq!(decode_const("(20)"), Some(ConstValue::Integer(20)));
    assert_eq!(decode_const("(-3)"), Some(ConstValue::Integer(-3)));
    assert_eq!(decode_const("(2.5)"), Some(ConstValue::Float(2.5)));
    assert_eq!(
        decode_const("(1.000000000000000e+000)"),
        Some(ConstValue::Float(1.0))
    );
    assert_eq!(
        decode_const("N'France'"),
        Some(ConstValue::Text("N'France'".to_string()))
    );
    assert_eq!(decode_const("NULL"), Some(ConstValue::Text("NULL".to_string())));
    assert_eq!(decode_const("(abc)"), None);
}

#[test]
fn test_decode_const_wider_than_i64_keeps_digits() {
    assert_eq!(
        decode_const("(99999999999999999999)"),
        Some(ConstValue::Text("99999999999999999999".to_string()))
    );
    assert_eq!(
        decode_const("(-99999999999999999999)"),
        Some(ConstValue::Text("-99999999999999999999".to_string()))
    );
}

#[test]
fn test_oversized_integer_const_parses() {
    let parsed = scalar(r#"<Const ConstValue="(99999999999999999999)"/>"#).unwrap();
    assert_eq!(
        parsed,
        ScalarOperator::constant(ConstValue::Text("99999999999999999999".to_string()))
    );
}

#[test]
fn test_unparsable_const_is_invalid_attribute() {
    let err = scalar(r#"<Const ConstValue="(1x)"/>"#).unwrap_err();
    assert!(matches!(err, ParseError::InvalidAttribute { ref attribute, .. } if attribute == "ConstValue"));
}

#[test]
fn test_compare() {
    let body = format!(
        r#"<Compare CompareOp="GT">{}{}</Compare>"#,
        ident("age"),
        constant("(20)")
    );
    match scalar(&body).unwrap() {
        ScalarOperator::Compare { op, operands } => {
            assert_eq!(op, CompareOp::Gt);
            assert_eq!(operands[1], ScalarOperator::constant(ConstValue::Integer(20)));
        }
        other => panic!("expected Compare, got {other:?}"),
    }
}

#[test]
fn test_compare_with_one_operand_is_arity_error() {
    let body = format!(r#"<Compare CompareOp="EQ">{}</Compare>"#, ident("age"));
    let err = scalar(&body).unwrap_err();
    assert_eq!(
        err,
        ParseError::Arity(ArityError {
            operator: "Compare",
            expected: 2,
            found: 1,
        })
    );
}

#[test]
fn test_arithmetic_rejects_unknown_operation() {
    let body = format!(
        r#"<Arithmetic Operation="MULT">{}{}</Arithmetic>"#,
        ident("a"),
        ident("b")
    );
    assert!(matches!(
        scalar(&body).unwrap_err(),
        ParseError::InvalidAttribute { .. }
    ));
}

#[test]
fn test_arithmetic() {
    let body = format!(
        r#"<Arithmetic Operation="DIV">{}{}</Arithmetic>"#,
        ident("a"),
        ident("b")
    );
    let parsed = scalar(&body).unwrap();
    assert!(matches!(parsed, ScalarOperator::Arithmetic { op: ArithmeticOp::Div, .. }));
}

#[test]
fn test_aggregate_countstar_has_no_operands() {
    let parsed = scalar(r#"<Aggregate AggType="countstar" Distinct="false"/>"#).unwrap();
    assert_eq!(
        parsed,
        ScalarOperator::Aggregate {
            agg_type: "countstar".to_string(),
            distinct: false,
            operands: vec![],
        }
    );
}

#[test]
fn test_aggregate_with_operand() {
    let body = format!(
        r#"<Aggregate AggType="COUNT_BIG" Distinct="true">{}</Aggregate>"#,
        ident("name")
    );
    match scalar(&body).unwrap() {
        ScalarOperator::Aggregate {
            agg_type,
            distinct,
            operands,
        } => {
            assert_eq!(agg_type, "COUNT_BIG");
            assert!(distinct);
            assert_eq!(operands.len(), 1);
        }
        other => panic!("expected Aggregate, got {other:?}"),
    }
}

#[test]
fn test_convert() {
    let body = format!(
        r#"<Convert DataType="varchar" Length="50" Style="0" Implicit="1">{}</Convert>"#,
        ident("name")
    );
    match scalar(&body).unwrap() {
        ScalarOperator::Convert {
            data_type,
            implicit,
            length,
            precision,
            ..
        } => {
            assert_eq!(data_type, "varchar");
            assert!(implicit);
            assert_eq!(length, Some(50));
            assert_eq!(precision, None);
        }
        other => panic!("expected Convert, got {other:?}"),
    }
}

#[test]
fn test_if_uses_showplan_spelling() {
    let body = format!(
        r#"<IF><Condition><ScalarOperator><Compare CompareOp="EQ">{}{}</Compare></ScalarOperator></Condition><Then>{}</Then><Else>{}</Else></IF>"#,
        ident("a"),
        constant("(0)"),
        constant("NULL"),
        ident("a")
    );
    match scalar(&body).unwrap() {
        ScalarOperator::If { then, .. } => {
            assert_eq!(
                *then,
                ScalarOperator::constant(ConstValue::Text("NULL".to_string()))
            );
        }
        other => panic!("expected If, got {other:?}"),
    }
}

#[test]
fn test_if_missing_branch() {
    let body = format!(
        r#"<IF><Condition>{}</Condition><Then>{}</Then></IF>"#,
        ident("a"),
        ident("b")
    );
    assert_eq!(
        scalar(&body).unwrap_err(),
        ParseError::MissingElement {
            parent: "IF".to_string(),
            element: "Else/ScalarOperator".to_string(),
        }
    );
}

#[test]
fn test_intrinsic() {
    let body = format!(
        r#"<Intrinsic FunctionName="like">{}{}</Intrinsic>"#,
        ident("name"),
        constant("N'%a%'")
    );
    match scalar(&body).unwrap() {
        ScalarOperator::Intrinsic { function_name, .. } => assert_eq!(function_name, "like"),
        other => panic!("expected Intrinsic, got {other:?}"),
    }
}

#[test]
fn test_logical_is_null_is_unary() {
    let body = format!(r#"<Logical Operation="IS NULL">{}</Logical>"#, ident("a"));
    match scalar(&body).unwrap() {
        ScalarOperator::Logical { op, operands } => {
            assert_eq!(op, LogicalOp::IsNull);
            assert_eq!(operands.len(), 1);
        }
        other => panic!("expected Logical, got {other:?}"),
    }
}

#[test]
fn test_logical_and_keeps_all_operands() {
    let body = format!(
        r#"<Logical Operation="AND">{}{}{}</Logical>"#,
        ident("a"),
        ident("b"),
        ident("c")
    );
    match scalar(&body).unwrap() {
        ScalarOperator::Logical { op, operands } => {
            assert_eq!(op, LogicalOp::And);
            assert_eq!(operands.len(), 3);
        }
        other => panic!("expected Logical, got {other:?}"),
    }
}

#[test]
fn test_unknown_tag() {
    assert_eq!(
        scalar(r#"<Subquery Operation="EXISTS"/>"#).unwrap_err(),
        ParseError::UnknownScalarOperator {
            tag: "Subquery".to_string()
        }
    );
}

#[test]
fn test_empty_wrapper() {
    assert!(matches!(
        scalar("").unwrap_err(),
        ParseError::MissingElement { .. }
    ));
}
