//! Operator classification: maps `(LogicalOp, PhysicalOp)` to an operator kind

use crate::error::{ParseError, ParseResult};
use ps_core::OperatorKind;

/// Physical-operator side of a classification rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Physical {
    /// The physical operator must equal the logical one
    SameAsLogical,
    /// The physical operator must equal this name
    Named(&'static str),
}

/// One row of the classification table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Accepted logical operator names
    pub logical: &'static [&'static str],
    /// Required physical operator
    pub physical: Physical,
    /// Resulting operator kind
    pub kind: OperatorKind,
}

impl Rule {
    /// Whether this rule accepts the pair
    pub fn matches(&self, logical: &str, physical: &str) -> bool {
        if !self.logical.contains(&logical) {
            return false;
        }
        match self.physical {
            Physical::SameAsLogical => logical == physical,
            Physical::Named(name) => physical == name,
        }
    }
}

/// The classification table, in priority order.
pub const RULES: [Rule; 14] = [
    Rule {
        logical: &["Compute Scalar"],
        physical: Physical::Named("Compute Scalar"),
        kind: OperatorKind::ComputeScalar,
    },
    Rule {
        logical: &["Aggregate"],
        physical: Physical::Named("Stream Aggregate"),
        kind: OperatorKind::StreamAggregate,
    },
    Rule {
        logical: &[
            "Clustered Index Scan",
            "Clustered Index Seek",
            "Index Scan",
            "Index Seek",
            "RID Lookup",
        ],
        physical: Physical::SameAsLogical,
        kind: OperatorKind::IndexScan,
    },
    Rule {
        logical: &["Sort", "Distinct Sort"],
        physical: Physical::Named("Sort"),
        kind: OperatorKind::Sort,
    },
    Rule {
        logical: &["Inner Join", "Left Anti Semi Join", "Left Semi Join"],
        physical: Physical::Named("Nested Loops"),
        kind: OperatorKind::NestedLoops,
    },
    Rule {
        logical: &["Filter"],
        physical: Physical::Named("Filter"),
        kind: OperatorKind::Filter,
    },
    Rule {
        logical: &["TopN Sort"],
        physical: Physical::Named("Sort"),
        kind: OperatorKind::TopSort,
    },
    Rule {
        logical: &["Top"],
        physical: Physical::Named("Top"),
        kind: OperatorKind::Top,
    },
    Rule {
        logical: &[
            "Union",
            "Inner Join",
            "Right Anti Semi Join",
            "Left Anti Semi Join",
        ],
        physical: Physical::Named("Merge Join"),
        kind: OperatorKind::Merge,
    },
    Rule {
        logical: &["Table Scan"],
        physical: Physical::Named("Table Scan"),
        kind: OperatorKind::TableScan,
    },
    Rule {
        logical: &["Aggregate", "Inner Join", "Right Anti Semi Join"],
        physical: Physical::Named("Hash Match"),
        kind: OperatorKind::Hash,
    },
    Rule {
        logical: &["Concatenation"],
        physical: Physical::Named("Concatenation"),
        kind: OperatorKind::Concat,
    },
    Rule {
        logical: &["Lazy Spool"],
        physical: Physical::Named("Row Count Spool"),
        kind: OperatorKind::RowCountSpool,
    },
    Rule {
        logical: &["Lazy Spool"],
        physical: Physical::Named("Table Spool"),
        kind: OperatorKind::Spool,
    },
];

/// Classify an operator; the first matching rule wins.
pub fn classify(logical: &str, physical: &str) -> ParseResult<OperatorKind> {
    let kind = RULES
        .iter()
        .find(|rule| rule.matches(logical, physical))
        .map(|rule| rule.kind)
        .ok_or_else(|| ParseError::UnsupportedOperator {
            logical: logical.to_string(),
            physical: physical.to_string(),
        })?;
    log::debug!("Classified ({logical}, {physical}) as {kind}");
    Ok(kind)
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
