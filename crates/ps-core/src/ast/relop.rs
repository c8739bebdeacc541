//! Relational operators, the nodes of the execution plan tree

use super::column::{ColumnReference, Object};
use super::scalar::{CompareOp, ScalarOperator};
use serde::{Deserialize, Serialize};

/// A column bound by an operator.
///
/// Exactly one of the three shapes holds per instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefinedValue {
    /// `column ← scalar`
    Expression {
        column: ColumnReference,
        scalar: ScalarOperator,
    },
    /// `column ← left ∪ right` (set-operation merge)
    Union {
        column: ColumnReference,
        left: ColumnReference,
        right: ColumnReference,
    },
    /// Bare group of columns, no expression
    Columns(Vec<ColumnReference>),
}

impl std::fmt::Display for DefinedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinedValue::Expression { column, scalar } => write!(f, "{column} \u{2190} {scalar}"),
            DefinedValue::Union {
                column,
                left,
                right,
            } => write!(f, "{column} \u{2190} {left} \u{222A} {right}"),
            DefinedValue::Columns(columns) => {
                let names: Vec<String> = columns.iter().map(ToString::to_string).collect();
                f.write_str(&names.join(", "))
            }
        }
    }
}

/// Sort specification shared by `Sort` and `TopSort`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// Ascending (true) or descending (false)
    pub ascending: bool,
    /// Sort columns, most significant first
    pub columns: Vec<ColumnReference>,
}

/// One bound of an index seek
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRange {
    /// Comparison applied between each range column and its expression
    pub scan_type: CompareOp,
    /// Index key columns
    pub range_columns: Vec<ColumnReference>,
    /// Values the key columns are compared against, positionally
    pub range_expressions: Vec<ScalarOperator>,
}

/// Index access bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeekPredicate {
    /// Equality prefix on the leading key columns
    pub prefix: Option<ScanRange>,
    /// Lower bound
    pub start_range: Option<ScanRange>,
    /// Upper bound
    pub end_range: Option<ScanRange>,
}

/// Physical operator kind.
///
/// One per `Operation` variant; the parser's classification table maps a
/// `(LogicalOp, PhysicalOp)` pair to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperatorKind {
    ComputeScalar,
    StreamAggregate,
    IndexScan,
    Sort,
    NestedLoops,
    Filter,
    TopSort,
    Top,
    Merge,
    TableScan,
    Hash,
    Concat,
    RowCountSpool,
    Spool,
}

impl OperatorKind {
    /// Every kind, in classification-table order
    pub const ALL: [OperatorKind; 14] = [
        OperatorKind::ComputeScalar,
        OperatorKind::StreamAggregate,
        OperatorKind::IndexScan,
        OperatorKind::Sort,
        OperatorKind::NestedLoops,
        OperatorKind::Filter,
        OperatorKind::TopSort,
        OperatorKind::Top,
        OperatorKind::Merge,
        OperatorKind::TableScan,
        OperatorKind::Hash,
        OperatorKind::Concat,
        OperatorKind::RowCountSpool,
        OperatorKind::Spool,
    ];

    /// Name of the XML element holding this operator's details
    pub fn tag(self) -> &'static str {
        match self {
            OperatorKind::ComputeScalar => "ComputeScalar",
            OperatorKind::StreamAggregate => "StreamAggregate",
            OperatorKind::IndexScan => "IndexScan",
            OperatorKind::Sort => "Sort",
            OperatorKind::NestedLoops => "NestedLoops",
            OperatorKind::Filter => "Filter",
            OperatorKind::TopSort => "TopSort",
            OperatorKind::Top => "Top",
            OperatorKind::Merge => "Merge",
            OperatorKind::TableScan => "TableScan",
            OperatorKind::Hash => "Hash",
            OperatorKind::Concat => "Concat",
            OperatorKind::RowCountSpool => "RowCountSpool",
            OperatorKind::Spool => "Spool",
        }
    }

    /// Human-readable title
    pub fn title(self) -> &'static str {
        match self {
            OperatorKind::ComputeScalar => "Compute Scalar",
            OperatorKind::StreamAggregate => "Stream Aggregate",
            OperatorKind::IndexScan => "Index Scan",
            OperatorKind::Sort => "Sort",
            OperatorKind::NestedLoops => "Nested Loops",
            OperatorKind::Filter => "Filter",
            OperatorKind::TopSort => "Top Sort",
            OperatorKind::Top => "Top",
            OperatorKind::Merge => "Merge",
            OperatorKind::TableScan => "Table Scan",
            OperatorKind::Hash => "Hash",
            OperatorKind::Concat => "Concat",
            OperatorKind::RowCountSpool => "Row Count Spool",
            OperatorKind::Spool => "Spool",
        }
    }
}

impl std::fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for OperatorKind {
    type Err = String;

    /// Accepts the tag or title in any case, ignoring spaces, `-` and `_`
    /// (`table-scan`, `TableScan`, `Table Scan` all match).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        OperatorKind::ALL
            .into_iter()
            .find(|kind| kind.tag().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown operator kind '{s}'"))
    }
}

/// Physical operation: the variant-specific payload of a `RelOp`.
///
/// Each variant owns its children by value; the plan is a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Clustered/non-clustered index scan or seek, or RID lookup
    IndexScan {
        ordered: bool,
        obj: Object,
        seek_predicate: Option<SeekPredicate>,
        predicates: Vec<ScalarOperator>,
        defined_values: Vec<DefinedValue>,
    },

    /// Heap scan
    TableScan {
        ordered: bool,
        obj: Object,
        predicate: Option<ScalarOperator>,
        defined_values: Vec<DefinedValue>,
    },

    /// Computes expressions over each input row
    ComputeScalar {
        relop: Box<RelOp>,
        compute_sequence: Option<bool>,
        defined_values: Vec<DefinedValue>,
    },

    /// Aggregation over sorted input
    StreamAggregate {
        relop: Box<RelOp>,
        group_by: Vec<ColumnReference>,
        defined_values: Vec<DefinedValue>,
    },

    /// Sort, optionally removing duplicates
    Sort {
        distinct: bool,
        order_by: OrderBy,
        relop: Box<RelOp>,
        defined_values: Vec<DefinedValue>,
    },

    /// Row filter
    Filter {
        startup_expression: bool,
        relop: Box<RelOp>,
        predicate: ScalarOperator,
        defined_values: Vec<DefinedValue>,
    },

    /// Sort keeping only the first `rows` rows
    TopSort {
        rows: u64,
        distinct: bool,
        order_by: OrderBy,
        relop: Box<RelOp>,
        defined_values: Vec<DefinedValue>,
    },

    /// Row limit
    Top {
        top_expression: ScalarOperator,
        relop: Box<RelOp>,
        defined_values: Vec<DefinedValue>,
    },

    /// Counts rows of its input
    RowCountSpool {
        relop: Box<RelOp>,
        defined_values: Vec<DefinedValue>,
    },

    /// Materialises its input in a worktable
    Spool {
        relop: Box<RelOp>,
        defined_values: Vec<DefinedValue>,
    },

    /// Nested loops join (outer = left, inner = right)
    NestedLoops {
        left: Box<RelOp>,
        right: Box<RelOp>,
        predicate: Option<ScalarOperator>,
        defined_values: Vec<DefinedValue>,
    },

    /// Merge join or merge union
    Merge {
        left: Box<RelOp>,
        right: Box<RelOp>,
        on_left: Option<ColumnReference>,
        on_right: Option<ColumnReference>,
        defined_values: Vec<DefinedValue>,
    },

    /// Hash match: aggregate (one input) or join (build, probe)
    Hash {
        relops: Vec<RelOp>,
        defined_values: Vec<DefinedValue>,
    },

    /// Concatenation of all inputs
    Concat {
        relops: Vec<RelOp>,
        defined_values: Vec<DefinedValue>,
    },
}

impl Operation {
    /// The kind of this operation
    pub fn kind(&self) -> OperatorKind {
        match self {
            Operation::IndexScan { .. } => OperatorKind::IndexScan,
            Operation::TableScan { .. } => OperatorKind::TableScan,
            Operation::ComputeScalar { .. } => OperatorKind::ComputeScalar,
            Operation::StreamAggregate { .. } => OperatorKind::StreamAggregate,
            Operation::Sort { .. } => OperatorKind::Sort,
            Operation::Filter { .. } => OperatorKind::Filter,
            Operation::TopSort { .. } => OperatorKind::TopSort,
            Operation::Top { .. } => OperatorKind::Top,
            Operation::RowCountSpool { .. } => OperatorKind::RowCountSpool,
            Operation::Spool { .. } => OperatorKind::Spool,
            Operation::NestedLoops { .. } => OperatorKind::NestedLoops,
            Operation::Merge { .. } => OperatorKind::Merge,
            Operation::Hash { .. } => OperatorKind::Hash,
            Operation::Concat { .. } => OperatorKind::Concat,
        }
    }

    /// Child operators, left to right
    pub fn children(&self) -> Vec<&RelOp> {
        match self {
            Operation::IndexScan { .. } | Operation::TableScan { .. } => Vec::new(),
            Operation::ComputeScalar { relop, .. }
            | Operation::StreamAggregate { relop, .. }
            | Operation::Sort { relop, .. }
            | Operation::Filter { relop, .. }
            | Operation::TopSort { relop, .. }
            | Operation::Top { relop, .. }
            | Operation::RowCountSpool { relop, .. }
            | Operation::Spool { relop, .. } => vec![relop.as_ref()],
            Operation::NestedLoops { left, right, .. } | Operation::Merge { left, right, .. } => {
                vec![left.as_ref(), right.as_ref()]
            }
            Operation::Hash { relops, .. } | Operation::Concat { relops, .. } => {
                relops.iter().collect()
            }
        }
    }

    /// Values bound by this operation
    pub fn defined_values(&self) -> &[DefinedValue] {
        match self {
            Operation::IndexScan { defined_values, .. }
            | Operation::TableScan { defined_values, .. }
            | Operation::ComputeScalar { defined_values, .. }
            | Operation::StreamAggregate { defined_values, .. }
            | Operation::Sort { defined_values, .. }
            | Operation::Filter { defined_values, .. }
            | Operation::TopSort { defined_values, .. }
            | Operation::Top { defined_values, .. }
            | Operation::RowCountSpool { defined_values, .. }
            | Operation::Spool { defined_values, .. }
            | Operation::NestedLoops { defined_values, .. }
            | Operation::Merge { defined_values, .. }
            | Operation::Hash { defined_values, .. }
            | Operation::Concat { defined_values, .. } => defined_values,
        }
    }
}

/// Relational operator, a node in the plan tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelOp {
    /// What this node does
    pub operation: Operation,
    /// Columns exposed to the consumer
    pub output_list: Vec<ColumnReference>,
    /// Values bound directly on the node (rare; most live on the operation)
    pub defined_values: Vec<DefinedValue>,
}

impl RelOp {
    /// Create a node with no node-level defined values
    pub fn new(operation: Operation, output_list: Vec<ColumnReference>) -> Self {
        Self {
            operation,
            output_list,
            defined_values: Vec::new(),
        }
    }

    /// Pre-order, left-to-right iterator over this node and all descendants
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Height of the subtree rooted here (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self
            .operation
            .children()
            .into_iter()
            .map(RelOp::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Iterator returned by [`RelOp::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a RelOp>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a RelOp;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.operation.children().into_iter().rev());
        Some(node)
    }
}

#[cfg(test)]
#[path = "relop_test.rs"]
mod tests;
