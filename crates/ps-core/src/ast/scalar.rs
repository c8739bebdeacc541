//! Scalar operators: the expression trees inside predicates and defined values

use super::column::ColumnReference;
use crate::error::ArityError;
use serde::{Deserialize, Serialize};

/// A literal value carried by a `Const` operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstValue {
    /// Parenthesised integer literal, e.g. `(10)`
    Integer(i64),
    /// Parenthesised floating point literal, e.g. `(1.500000000000000e+000)`
    Float(f64),
    /// Anything else, kept verbatim (e.g. `N'Smith'`, `NULL`)
    Text(String),
}

impl std::fmt::Display for ConstValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstValue::Integer(v) => write!(f, "{v}"),
            ConstValue::Float(v) => write!(f, "{v}"),
            ConstValue::Text(v) => f.write_str(v),
        }
    }
}

/// Arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Division (/)
    Div,
}

impl ArithmeticOp {
    /// Convert from the optimizer's `Operation` attribute
    pub fn from_showplan(s: &str) -> Option<Self> {
        match s {
            "ADD" => Some(ArithmeticOp::Add),
            "SUB" => Some(ArithmeticOp::Sub),
            "DIV" => Some(ArithmeticOp::Div),
            _ => None,
        }
    }

    /// Infix sign
    pub fn sign(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Div => "/",
        }
    }
}

/// Comparison operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    /// Equality (=)
    Eq,
    /// Inequality (<>)
    Ne,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
    /// Null-aware identity (IS)
    Is,
}

impl CompareOp {
    /// Convert from the optimizer's `CompareOp` / `ScanType` attribute
    pub fn from_showplan(s: &str) -> Option<Self> {
        match s {
            "EQ" => Some(CompareOp::Eq),
            "NE" => Some(CompareOp::Ne),
            "LT" => Some(CompareOp::Lt),
            "LE" => Some(CompareOp::Le),
            "GT" => Some(CompareOp::Gt),
            "GE" => Some(CompareOp::Ge),
            "IS" => Some(CompareOp::Is),
            _ => None,
        }
    }

    /// Infix sign
    pub fn sign(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Is => "IS",
        }
    }
}

/// Logical operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    /// Conjunction
    And,
    /// Disjunction
    Or,
    /// Null test (unary)
    IsNull,
}

impl LogicalOp {
    /// Convert from the optimizer's `Operation` attribute
    pub fn from_showplan(s: &str) -> Option<Self> {
        match s {
            "AND" => Some(LogicalOp::And),
            "OR" => Some(LogicalOp::Or),
            "IS NULL" => Some(LogicalOp::IsNull),
            _ => None,
        }
    }

    /// Keyword as it appears in SQL
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
            LogicalOp::IsNull => "IS NULL",
        }
    }
}

/// Scalar operator, one expression node.
///
/// The binary variants store their operands in a fixed-size array, so a
/// wrong operand count can only surface from the checked constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarOperator {
    /// Aggregate function application (`COUNT_BIG`, `MAX`, `countstar`, ...)
    Aggregate {
        agg_type: String,
        distinct: bool,
        operands: Vec<ScalarOperator>,
    },

    /// Binary arithmetic
    Arithmetic {
        op: ArithmeticOp,
        operands: Box<[ScalarOperator; 2]>,
    },

    /// Binary comparison
    Compare {
        op: CompareOp,
        operands: Box<[ScalarOperator; 2]>,
    },

    /// Literal
    Const { value: ConstValue },

    /// Type conversion, implicit or explicit
    Convert {
        operand: Box<ScalarOperator>,
        data_type: String,
        implicit: bool,
        length: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    },

    /// Conditional expression
    If {
        condition: Box<ScalarOperator>,
        then: Box<ScalarOperator>,
        otherwise: Box<ScalarOperator>,
    },

    /// Column reference
    Identifier { column: ColumnReference },

    /// Built-in binary function such as `like`
    Intrinsic {
        function_name: String,
        operands: Box<[ScalarOperator; 2]>,
    },

    /// Boolean connective or null test
    Logical {
        op: LogicalOp,
        operands: Vec<ScalarOperator>,
    },
}

fn pair(
    operator: &'static str,
    operands: Vec<ScalarOperator>,
) -> Result<Box<[ScalarOperator; 2]>, ArityError> {
    let found = operands.len();
    <[ScalarOperator; 2]>::try_from(operands)
        .map(Box::new)
        .map_err(|_| ArityError {
            operator,
            expected: 2,
            found,
        })
}

impl ScalarOperator {
    /// Build an `Arithmetic` node, rejecting operand lists of length other than 2
    pub fn arithmetic(
        op: ArithmeticOp,
        operands: Vec<ScalarOperator>,
    ) -> Result<Self, ArityError> {
        Ok(ScalarOperator::Arithmetic {
            op,
            operands: pair("Arithmetic", operands)?,
        })
    }

    /// Build a `Compare` node, rejecting operand lists of length other than 2
    pub fn compare(op: CompareOp, operands: Vec<ScalarOperator>) -> Result<Self, ArityError> {
        Ok(ScalarOperator::Compare {
            op,
            operands: pair("Compare", operands)?,
        })
    }

    /// Build an `Intrinsic` node, rejecting operand lists of length other than 2
    pub fn intrinsic(
        function_name: impl Into<String>,
        operands: Vec<ScalarOperator>,
    ) -> Result<Self, ArityError> {
        Ok(ScalarOperator::Intrinsic {
            function_name: function_name.into(),
            operands: pair("Intrinsic", operands)?,
        })
    }

    /// Shorthand for an `Identifier` over the given column
    pub fn identifier(column: ColumnReference) -> Self {
        ScalarOperator::Identifier { column }
    }

    /// Shorthand for a `Const`
    pub fn constant(value: ConstValue) -> Self {
        ScalarOperator::Const { value }
    }
}

fn join(operands: &[ScalarOperator], sep: &str) -> String {
    operands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

/// Raw, table-qualified rendering used by diagnostics and diagram labels.
impl std::fmt::Display for ScalarOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarOperator::Aggregate {
                agg_type,
                distinct,
                operands,
            } => {
                if operands.is_empty() {
                    return f.write_str(agg_type);
                }
                let distinct = if *distinct { "DISTINCT " } else { "" };
                write!(f, "{agg_type}({distinct}{})", join(operands, ", "))
            }
            ScalarOperator::Arithmetic { op, operands } => {
                write!(f, "{} {} {}", operands[0], op.sign(), operands[1])
            }
            ScalarOperator::Compare { op, operands } => {
                write!(f, "{} {} {}", operands[0], op.sign(), operands[1])
            }
            ScalarOperator::Const { value } => write!(f, "{value}"),
            ScalarOperator::Convert {
                operand, data_type, ..
            } => write!(f, "Convert({operand}, {data_type})"),
            ScalarOperator::If {
                condition,
                then,
                otherwise,
            } => write!(f, "IF {condition} {then}; ELSE {otherwise};"),
            ScalarOperator::Identifier { column } => write!(f, "{column}"),
            ScalarOperator::Intrinsic {
                function_name,
                operands,
            } => write!(f, "{} {} {}", operands[0], function_name, operands[1]),
            ScalarOperator::Logical { op, operands } => match op {
                LogicalOp::IsNull => {
                    let tests: Vec<String> =
                        operands.iter().map(|o| format!("{o} IS NULL")).collect();
                    f.write_str(&tests.join(" AND "))
                }
                LogicalOp::And | LogicalOp::Or => {
                    f.write_str(&join(operands, &format!(" {} ", op.keyword())))
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "scalar_test.rs"]
mod tests;
