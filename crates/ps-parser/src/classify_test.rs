use super::*;
use std::collections::HashSet;

/// Every concrete `(logical, physical)` pair a rule accepts
fn rule_pairs(rule: &Rule) -> Vec<(&'static str, &'static str)> {
    rule.logical
        .iter()
        .map(|&logical| match rule.physical {
            Physical::SameAsLogical => (logical, logical),
            Physical::Named(name) => (logical, name),
        })
        .collect()
}

fn all_pairs() -> Vec<(&'static str, &'static str)> {
    RULES.iter().flat_map(rule_pairs).collect()
}

#[test]
fn test_every_pair_matches_exactly_one_rule() {
    for (logical, physical) in all_pairs() {
        let matching: Vec<&Rule> = RULES
            .iter()
            .filter(|rule| rule.matches(logical, physical))
            .collect();
        assert_eq!(
            matching.len(),
            1,
            "({logical}, {physical}) matched {} rules",
            matching.len()
        );
    }
}

#[test]
fn test_no_two_rules_share_a_pair() {
    let pairs = all_pairs();
    let unique: HashSet<_> = pairs.iter().collect();
    assert_eq!(unique.len(), pairs.len());
}

#[test]
fn test_every_kind_is_reachable() {
    let kinds: HashSet<OperatorKind> = RULES.iter().map(|rule| rule.kind).collect();
    assert_eq!(kinds.len(), OperatorKind::ALL.len());
}

#[test]
fn test_inner_join_disambiguated_by_physical() {
    assert_eq!(
        classify("Inner Join", "Nested Loops").unwrap(),
        OperatorKind::NestedLoops
    );
    assert_eq!(classify("Inner Join", "Merge Join").unwrap(), OperatorKind::Merge);
    assert_eq!(classify("Inner Join", "Hash Match").unwrap(), OperatorKind::Hash);
}

#[test]
fn test_sort_variants() {
    assert_eq!(classify("Sort", "Sort").unwrap(), OperatorKind::Sort);
    assert_eq!(classify("Distinct Sort", "Sort").unwrap(), OperatorKind::Sort);
    assert_eq!(classify("TopN Sort", "Sort").unwrap(), OperatorKind::TopSort);
}

#[test]
fn test_index_scan_requires_identical_names() {
    assert_eq!(
        classify("Clustered Index Seek", "Clustered Index Seek").unwrap(),
        OperatorKind::IndexScan
    );
    assert_eq!(classify("RID Lookup", "RID Lookup").unwrap(), OperatorKind::IndexScan);
    assert!(classify("Index Seek", "Index Scan").is_err());
}

#[test]
fn test_spools() {
    assert_eq!(
        classify("Lazy Spool", "Row Count Spool").unwrap(),
        OperatorKind::RowCountSpool
    );
    assert_eq!(classify("Lazy Spool", "Table Spool").unwrap(), OperatorKind::Spool);
    assert!(classify("Eager Spool", "Table Spool").is_err());
}

#[test]
fn test_unmapped_pair_is_rejected() {
    let err = classify("Switch", "Switch").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnsupportedOperator {
            logical: "Switch".to_string(),
            physical: "Switch".to_string(),
        }
    );
    assert!(err.to_string().contains("(Switch, Switch)"));
}

#[test]
fn test_aggregate_physical_variants() {
    assert_eq!(
        classify("Aggregate", "Stream Aggregate").unwrap(),
        OperatorKind::StreamAggregate
    );
    assert_eq!(classify("Aggregate", "Hash Match").unwrap(), OperatorKind::Hash);
    assert!(classify("Aggregate", "Aggregate").is_err());
}
