use super::*;
use ps_core::{ColumnReference, CompareOp, ConstValue, Object, RelOp, ScalarOperator};

fn scan() -> RelOp {
    RelOp::new(
        Operation::TableScan {
            ordered: false,
            obj: Object::new("[dbo]", "[singer]"),
            predicate: None,
            defined_values: vec![DefinedValue::Columns(vec![ColumnReference::new("name")])],
        },
        vec![ColumnReference::new("name")],
    )
}

#[test]
fn test_table_scan_details() {
    let (title, details) = describe(&scan().operation);
    assert_eq!(title, "Table Scan");
    assert_eq!(details, vec!["Scan Object: [singer] table", "Ordered? false"]);
}

#[test]
fn test_bare_column_defined_values_are_not_listed() {
    let (_, details) = describe(&scan().operation);
    assert!(!details.iter().any(|d| d.starts_with("Defined Values")));
}

#[test]
fn test_compute_scalar_lists_expressions() {
    let operation = Operation::ComputeScalar {
        relop: Box::new(scan()),
        compute_sequence: None,
        defined_values: vec![DefinedValue::Expression {
            column: ColumnReference::new("Expr1002"),
            scalar: ScalarOperator::constant(ConstValue::Integer(1)),
        }],
    };
    let (title, details) = describe(&operation);
    assert_eq!(title, "Compute Scalar");
    assert_eq!(details, vec!["Defined Values:", "Expr1002 \u{2190} 1"]);
}

#[test]
fn test_sort_order_by() {
    let operation = Operation::Sort {
        distinct: true,
        order_by: OrderBy {
            ascending: false,
            columns: vec![ColumnReference::new("age").with_table("[singer]")],
        },
        relop: Box::new(scan()),
        defined_values: vec![],
    };
    let (_, details) = describe(&operation);
    assert_eq!(
        details,
        vec!["Distinct? true", "Order By (DESC):", "[singer].age"]
    );
}

#[test]
fn test_index_seek_sections() {
    let operation = Operation::IndexScan {
        ordered: true,
        obj: Object::new("[dbo]", "[singer]").with_index("[PK__singer__1]"),
        seek_predicate: Some(SeekPredicate {
            prefix: Some(ScanRange {
                scan_type: CompareOp::Eq,
                range_columns: vec![ColumnReference::new("singer_id")],
                range_expressions: vec![ScalarOperator::constant(ConstValue::Integer(3))],
            }),
            start_range: None,
            end_range: None,
        }),
        predicates: vec![],
        defined_values: vec![],
    };
    let (title, details) = describe(&operation);
    assert_eq!(title, "Index Scan");
    assert_eq!(
        details,
        vec![
            "Scan Object: [singer] table",
            "Ordered? true",
            "",
            "Seek Predicate:",
            "Prefix: singer_id = 3",
        ]
    );
}
