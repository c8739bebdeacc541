use super::*;
use ps_core::{ArithmeticOp, ColumnReference, CompareOp, ConstValue};

fn col(name: &str) -> ScalarOperator {
    ScalarOperator::identifier(ColumnReference::new(name).with_table("[singer]"))
}

fn int(value: i64) -> ScalarOperator {
    ScalarOperator::constant(ConstValue::Integer(value))
}

fn text(value: &str) -> ScalarOperator {
    ScalarOperator::constant(ConstValue::Text(value.to_string()))
}

fn compare(op: CompareOp, lhs: ScalarOperator, rhs: ScalarOperator) -> ScalarOperator {
    ScalarOperator::compare(op, vec![lhs, rhs]).unwrap()
}

#[test]
fn test_identifier_drops_table() {
    assert_eq!(format_scalar(&col("age"), &Environment::new()), "age");
}

#[test]
fn test_identifier_resolves_placeholder() {
    let mut env = Environment::new();
    env.register("Expr1001", "number of rows");
    let scalar = ScalarOperator::identifier(ColumnReference::new("Expr1001"));
    assert_eq!(format_scalar(&scalar, &env), "number of rows");
}

#[test]
fn test_compare_signs() {
    let env = Environment::new();
    let cases = [
        (CompareOp::Eq, "age = 20"),
        (CompareOp::Ne, "age <> 20"),
        (CompareOp::Lt, "age < 20"),
        (CompareOp::Le, "age <= 20"),
        (CompareOp::Gt, "age > 20"),
        (CompareOp::Ge, "age >= 20"),
        (CompareOp::Is, "age IS 20"),
    ];
    for (op, expected) in cases {
        assert_eq!(format_scalar(&compare(op, col("age"), int(20)), &env), expected);
    }
}

#[test]
fn test_arithmetic() {
    let scalar = ScalarOperator::arithmetic(ArithmeticOp::Div, vec![col("a"), int(2)]).unwrap();
    assert_eq!(format_scalar(&scalar, &Environment::new()), "a / 2");
}

#[test]
fn test_const_literals() {
    let env = Environment::new();
    assert_eq!(format_scalar(&int(7), &env), "7");
    assert_eq!(
        format_scalar(&ScalarOperator::constant(ConstValue::Float(2.5)), &env),
        "2.5"
    );
    assert_eq!(format_scalar(&text("N'France'"), &env), "N'France'");
}

#[test]
fn test_convert_is_transparent() {
    let scalar = ScalarOperator::Convert {
        operand: Box::new(col("age")),
        data_type: "int".to_string(),
        implicit: true,
        length: None,
        precision: None,
        scale: None,
    };
    assert_eq!(format_scalar(&scalar, &Environment::new()), "age");
}

#[test]
fn test_aggregate() {
    let env = Environment::new();
    let countstar = ScalarOperator::Aggregate {
        agg_type: "countstar".to_string(),
        distinct: false,
        operands: vec![],
    };
    assert_eq!(format_scalar(&countstar, &env), "number of rows");

    let max = ScalarOperator::Aggregate {
        agg_type: "MAX".to_string(),
        distinct: false,
        operands: vec![col("age")],
    };
    assert_eq!(format_scalar(&max, &env), "MAX(age)");

    let count = ScalarOperator::Aggregate {
        agg_type: "COUNT_BIG".to_string(),
        distinct: true,
        operands: vec![col("name")],
    };
    assert_eq!(format_scalar(&count, &env), "COUNT_BIG(DISTINCT name)");
}

#[test]
fn test_if() {
    let scalar = ScalarOperator::If {
        condition: Box::new(compare(CompareOp::Eq, col("n"), int(0))),
        then: Box::new(text("NULL")),
        otherwise: Box::new(col("total")),
    };
    assert_eq!(
        format_scalar(&scalar, &Environment::new()),
        "NULL if n = 0, otherwise total"
    );
}

#[test]
fn test_intrinsic() {
    let scalar = ScalarOperator::intrinsic("like", vec![col("name"), text("N'%a%'")]).unwrap();
    assert_eq!(format_scalar(&scalar, &Environment::new()), "name like N'%a%'");
}

#[test]
fn test_logical_and() {
    let scalar = ScalarOperator::Logical {
        op: LogicalOp::And,
        operands: vec![
            compare(CompareOp::Gt, col("age"), int(20)),
            compare(CompareOp::Eq, col("country"), text("N'France'")),
        ],
    };
    assert_eq!(
        format_scalar(&scalar, &Environment::new()),
        "age > 20 AND country = N'France'"
    );
}

#[test]
fn test_logical_nested_different_operator_is_parenthesised() {
    let or = ScalarOperator::Logical {
        op: LogicalOp::Or,
        operands: vec![
            compare(CompareOp::Eq, col("a"), int(1)),
            compare(CompareOp::Eq, col("b"), int(2)),
        ],
    };
    let and = ScalarOperator::Logical {
        op: LogicalOp::And,
        operands: vec![or, compare(CompareOp::Lt, col("c"), int(3))],
    };
    assert_eq!(
        format_scalar(&and, &Environment::new()),
        "(a = 1 OR b = 2) AND c < 3"
    );
}

#[test]
fn test_logical_nested_same_operator_is_flat() {
    let inner = ScalarOperator::Logical {
        op: LogicalOp::And,
        operands: vec![col("a"), col("b")],
    };
    let outer = ScalarOperator::Logical {
        op: LogicalOp::And,
        operands: vec![inner, col("c")],
    };
    assert_eq!(format_scalar(&outer, &Environment::new()), "a AND b AND c");
}

#[test]
fn test_is_null() {
    let scalar = ScalarOperator::Logical {
        op: LogicalOp::IsNull,
        operands: vec![col("age")],
    };
    assert_eq!(format_scalar(&scalar, &Environment::new()), "age IS NULL");
}
