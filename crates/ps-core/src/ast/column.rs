//! Column references and physical access targets

use serde::{Deserialize, Serialize};

/// A result column, optionally qualified by schema, table and alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnReference {
    /// Column name (or an expression placeholder such as `Expr1001`)
    pub column: String,
    /// Owning schema, e.g. `[dbo]`
    pub schema: Option<String>,
    /// Owning table, e.g. `[Person]`
    pub table: Option<String>,
    /// Table alias used in the query
    pub alias: Option<String>,
}

impl ColumnReference {
    /// Create an unqualified column reference
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            schema: None,
            table: None,
            alias: None,
        }
    }

    /// Return a copy qualified with the given table
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Return a copy qualified with the given schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

impl std::fmt::Display for ColumnReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.column),
            None => f.write_str(&self.column),
        }
    }
}

/// The table or index a scan operator reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    /// Schema name
    pub schema: String,
    /// Table name
    pub table: String,
    /// Alias used in the query
    pub alias: Option<String>,
    /// Index name, bracketed as emitted by the optimizer (`[PK__Person__1]`)
    pub index: Option<String>,
}

impl Object {
    /// Create an object without alias or index
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            alias: None,
            index: None,
        }
    }

    /// Return a copy that reads through the given index
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// The index kind: the index name without brackets, up to the first `__`.
    ///
    /// System-generated key indexes are named `PK__<table>__<hash>` or
    /// `UQ__<table>__<hash>`, so their kind is `PK` or `UQ`.
    pub fn index_kind(&self) -> Option<&str> {
        let index = self.index.as_deref()?;
        let bare = index
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(index);
        bare.split("__").next()
    }

    /// Whether the access goes through a user-defined index
    pub fn uses_user_index(&self) -> bool {
        matches!(self.index_kind(), Some(kind) if kind != "PK" && kind != "UQ")
    }
}

impl std::fmt::Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} table", self.table)?;
        if self.uses_user_index() {
            f.write_str(", using user index")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "column_test.rs"]
mod tests;
