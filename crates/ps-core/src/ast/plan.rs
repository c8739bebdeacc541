//! Parse result: the query text plus its operator tree

use super::relop::{OperatorKind, Operation, RelOp};
use serde::{Deserialize, Serialize};

/// An execution plan for one statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    /// Statement text as recorded by the optimizer
    pub query: String,
    /// Root operator
    pub relop: RelOp,
}

impl ExecutionPlan {
    /// Create a plan
    pub fn new(query: impl Into<String>, relop: RelOp) -> Self {
        Self {
            query: query.into(),
            relop,
        }
    }

    /// All operations of the given kind, in pre-order
    pub fn find(&self, kind: OperatorKind) -> Vec<&Operation> {
        self.relop
            .descendants()
            .map(|node| &node.operation)
            .filter(|op| op.kind() == kind)
            .collect()
    }

    /// Number of operator nodes in the plan
    pub fn node_count(&self) -> usize {
        self.relop.descendants().count()
    }
}
