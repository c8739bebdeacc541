use super::*;

fn ident(name: &str) -> ScalarOperator {
    ScalarOperator::identifier(ColumnReference::new(name))
}

fn int(v: i64) -> ScalarOperator {
    ScalarOperator::constant(ConstValue::Integer(v))
}

#[test]
fn test_arithmetic_requires_two_operands() {
    let ok = ScalarOperator::arithmetic(ArithmeticOp::Add, vec![ident("a"), int(1)]);
    assert!(ok.is_ok());

    let err = ScalarOperator::arithmetic(ArithmeticOp::Add, vec![ident("a")]).unwrap_err();
    assert_eq!(
        err,
        ArityError {
            operator: "Arithmetic",
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn test_compare_rejects_three_operands() {
    let err = ScalarOperator::compare(CompareOp::Eq, vec![ident("a"), ident("b"), int(3)])
        .unwrap_err();
    assert_eq!(err.operator, "Compare");
    assert_eq!(err.found, 3);
}

#[test]
fn test_intrinsic_rejects_empty_operands() {
    let err = ScalarOperator::intrinsic("like", vec![]).unwrap_err();
    assert_eq!(err.operator, "Intrinsic");
    assert_eq!(err.found, 0);
    assert!(err.to_string().contains("[C010]"));
}

#[test]
fn test_operator_spellings() {
    assert_eq!(ArithmeticOp::from_showplan("DIV"), Some(ArithmeticOp::Div));
    assert_eq!(ArithmeticOp::from_showplan("MULT"), None);
    assert_eq!(CompareOp::from_showplan("GE"), Some(CompareOp::Ge));
    assert_eq!(CompareOp::from_showplan("NE").map(CompareOp::sign), Some("<>"));
    assert_eq!(LogicalOp::from_showplan("IS NULL"), Some(LogicalOp::IsNull));
    assert_eq!(LogicalOp::from_showplan("NOT"), None);
}

#[test]
fn test_display_compare() {
    let cmp = ScalarOperator::compare(
        CompareOp::Le,
        vec![
            ScalarOperator::identifier(ColumnReference::new("Age").with_table("Person")),
            int(30),
        ],
    )
    .unwrap();
    assert_eq!(cmp.to_string(), "Person.Age <= 30");
}

#[test]
fn test_display_aggregate() {
    let count = ScalarOperator::Aggregate {
        agg_type: "countstar".to_string(),
        distinct: false,
        operands: vec![],
    };
    assert_eq!(count.to_string(), "countstar");

    let distinct = ScalarOperator::Aggregate {
        agg_type: "COUNT_BIG".to_string(),
        distinct: true,
        operands: vec![ident("Name")],
    };
    assert_eq!(distinct.to_string(), "COUNT_BIG(DISTINCT Name)");
}

#[test]
fn test_display_logical_and_is_null() {
    let and = ScalarOperator::Logical {
        op: LogicalOp::And,
        operands: vec![ident("a"), ident("b"), ident("c")],
    };
    assert_eq!(and.to_string(), "a AND b AND c");

    let is_null = ScalarOperator::Logical {
        op: LogicalOp::IsNull,
        operands: vec![ident("a")],
    };
    assert_eq!(is_null.to_string(), "a IS NULL");
}

#[test]
fn test_display_convert_and_if() {
    let convert = ScalarOperator::Convert {
        operand: Box::new(ident("Expr1002")),
        data_type: "int".to_string(),
        implicit: true,
        length: None,
        precision: None,
        scale: None,
    };
    assert_eq!(convert.to_string(), "Convert(Expr1002, int)");

    let cond = ScalarOperator::If {
        condition: Box::new(ident("c")),
        then: Box::new(int(1)),
        otherwise: Box::new(int(0)),
    };
    assert_eq!(cond.to_string(), "IF c 1; ELSE 0;");
}

#[test]
fn test_const_display() {
    assert_eq!(ConstValue::Integer(10).to_string(), "10");
    assert_eq!(ConstValue::Float(1.5).to_string(), "1.5");
    assert_eq!(ConstValue::Text("N'Smith'".into()).to_string(), "N'Smith'");
}
